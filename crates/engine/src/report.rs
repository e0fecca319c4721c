//! Read-only views over a contract collection: status-group counts, search,
//! dashboard rows and the lifecycle timeline.
//!
//! Pure functions. No IO. Recomputed on every call.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use contractflow_model::{Blueprint, Contract, ContractStatus, ModelError};
use serde::Serialize;

use crate::lifecycle::can_reach;

/// Coarse partition of the six statuses for summary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusGroup {
    Pending,
    Active,
    Signed,
}

impl StatusGroup {
    pub const ALL: [StatusGroup; 3] = [
        StatusGroup::Pending,
        StatusGroup::Active,
        StatusGroup::Signed,
    ];

    /// Group of a status.
    ///
    /// REVOKED lands in PENDING even though it is terminal. Dashboards have
    /// always shown revoked contracts alongside pending ones; keep it until
    /// a dedicated group is agreed on.
    pub fn of(status: ContractStatus) -> Self {
        match status {
            ContractStatus::Created | ContractStatus::Approved | ContractStatus::Revoked => {
                StatusGroup::Pending
            }
            ContractStatus::Sent => StatusGroup::Active,
            ContractStatus::Signed | ContractStatus::Locked => StatusGroup::Signed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusGroup::Pending => "PENDING",
            StatusGroup::Active => "ACTIVE",
            StatusGroup::Signed => "SIGNED",
        }
    }
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusGroup {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ModelError::UnknownEnumValue {
                kind: "status group",
                value: s.to_string(),
            })
    }
}

/// Group selector for [`filter_contracts`]; `All` disables group filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Only(StatusGroup),
}

impl GroupFilter {
    pub fn admits(self, status: ContractStatus) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Only(group) => StatusGroup::of(status) == group,
        }
    }
}

impl FromStr for GroupFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            Ok(GroupFilter::All)
        } else {
            s.parse().map(GroupFilter::Only)
        }
    }
}

/// Contract counts per status group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupCounts {
    pub total: usize,
    pub pending: usize,
    pub active: usize,
    pub signed: usize,
}

impl GroupCounts {
    pub fn get(&self, group: StatusGroup) -> usize {
        match group {
            StatusGroup::Pending => self.pending,
            StatusGroup::Active => self.active,
            StatusGroup::Signed => self.signed,
        }
    }
}

pub fn count_by_group(contracts: &[Contract]) -> GroupCounts {
    let mut counts = GroupCounts {
        total: contracts.len(),
        ..GroupCounts::default()
    };
    for contract in contracts {
        match StatusGroup::of(contract.status) {
            StatusGroup::Pending => counts.pending += 1,
            StatusGroup::Active => counts.active += 1,
            StatusGroup::Signed => counts.signed += 1,
        }
    }
    counts
}

/// Contracts admitted by `filter` whose name or id contains `search`,
/// case-insensitively. Input order is kept.
pub fn filter_contracts<'a>(
    contracts: &'a [Contract],
    filter: GroupFilter,
    search: &str,
) -> Vec<&'a Contract> {
    let needle = search.to_lowercase();
    contracts
        .iter()
        .filter(|c| filter.admits(c.status))
        .filter(|c| {
            c.name.to_lowercase().contains(&needle) || c.id.to_lowercase().contains(&needle)
        })
        .collect()
}

/// One dashboard line: a contract and the name of its blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRow {
    pub id: String,
    pub name: String,
    /// `None` when the blueprint reference does not resolve.
    pub blueprint_name: Option<String>,
    pub status: ContractStatus,
    pub group: StatusGroup,
    pub locked: bool,
    pub created_at: String,
}

pub fn contract_rows<'a, I>(contracts: I, blueprints: &[Blueprint]) -> Vec<ContractRow>
where
    I: IntoIterator<Item = &'a Contract>,
{
    let names: HashMap<&str, &str> = blueprints
        .iter()
        .map(|b| (b.id.as_str(), b.name.as_str()))
        .collect();
    contracts
        .into_iter()
        .map(|c| ContractRow {
            id: c.id.clone(),
            name: c.name.clone(),
            blueprint_name: names.get(c.blueprint_id.as_str()).map(|n| n.to_string()),
            status: c.status,
            group: StatusGroup::of(c.status),
            locked: crate::lifecycle::is_locked(c.status),
            created_at: c.created_at.clone(),
        })
        .collect()
}

/// Where a status sits relative to a contract's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepPhase {
    /// Already passed on the linear lifecycle.
    Reached,
    Current,
    /// Still reachable from the current status.
    Ahead,
    /// No longer reachable, and not known to have been passed.
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub status: ContractStatus,
    pub phase: StepPhase,
}

/// One step per status, in declaration order.
///
/// For a REVOKED contract only CREATED counts as reached: revocation is
/// possible from CREATED or SENT and the record does not say which.
pub fn lifecycle_timeline(current: ContractStatus) -> Vec<TimelineStep> {
    ContractStatus::ALL
        .into_iter()
        .map(|status| {
            let phase = if status == current {
                StepPhase::Current
            } else if is_behind(status, current) {
                StepPhase::Reached
            } else if can_reach(current, status) {
                StepPhase::Ahead
            } else {
                StepPhase::Unreachable
            };
            TimelineStep { status, phase }
        })
        .collect()
}

fn is_behind(status: ContractStatus, current: ContractStatus) -> bool {
    match (status.lifecycle_rank(), current.lifecycle_rank()) {
        (Some(s), Some(c)) => s < c,
        (Some(0), None) => true,
        _ => false,
    }
}
