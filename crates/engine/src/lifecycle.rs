//! Contract status state machine.
//!
//! ```text
//! CREATED ──> APPROVED ──> SENT ──> SIGNED ──> LOCKED
//!    │                      │
//!    └────────> REVOKED <───┘
//! ```
//!
//! LOCKED and REVOKED are terminal: no outgoing transitions, and field
//! values can no longer change. Everything here is pure; persistence is the
//! caller's job (see [`crate::Engine`]).

use contractflow_model::{Contract, ContractStatus, FieldValue};

use crate::error::EngineError;

/// Allowed targets from `status`. Empty means terminal.
pub fn next_statuses(status: ContractStatus) -> &'static [ContractStatus] {
    use ContractStatus::*;
    match status {
        Created => &[Approved, Revoked],
        Approved => &[Sent],
        Sent => &[Signed, Revoked],
        Signed => &[Locked],
        Locked | Revoked => &[],
    }
}

/// True iff field values and status are frozen.
pub fn is_locked(status: ContractStatus) -> bool {
    matches!(status, ContractStatus::Locked | ContractStatus::Revoked)
}

pub fn can_transition(from: ContractStatus, to: ContractStatus) -> bool {
    next_statuses(from).contains(&to)
}

/// REVOKED is the only destructive edge; callers may present it apart.
pub fn is_revocation(target: ContractStatus) -> bool {
    target == ContractStatus::Revoked
}

/// Whether `to` can be reached from `from` in one or more transitions.
pub fn can_reach(from: ContractStatus, to: ContractStatus) -> bool {
    let mut frontier: Vec<ContractStatus> = next_statuses(from).to_vec();
    let mut seen: Vec<ContractStatus> = Vec::new();
    while let Some(status) = frontier.pop() {
        if status == to {
            return true;
        }
        if !seen.contains(&status) {
            seen.push(status);
            frontier.extend_from_slice(next_statuses(status));
        }
    }
    false
}

/// Refuse `target` unless it is a successor of the contract's status.
pub fn check_transition(contract: &Contract, target: ContractStatus) -> Result<(), EngineError> {
    if can_transition(contract.status, target) {
        Ok(())
    } else {
        Err(EngineError::InvalidTransition {
            contract_id: contract.id.clone(),
            from: contract.status,
            to: target,
        })
    }
}

/// Refuse field edits on a terminal contract.
pub fn check_editable(contract: &Contract) -> Result<(), EngineError> {
    if is_locked(contract.status) {
        Err(EngineError::ContractLocked {
            contract_id: contract.id.clone(),
            status: contract.status,
        })
    } else {
        Ok(())
    }
}

/// The contract after moving to `target` at `now`, or `InvalidTransition`.
pub fn apply_transition(
    contract: &Contract,
    target: ContractStatus,
    now: &str,
) -> Result<Contract, EngineError> {
    check_transition(contract, target)?;
    let mut next = contract.clone();
    next.status = target;
    next.updated_at = now.to_string();
    Ok(next)
}

/// The contract with `field_id` set to `value` at `now`, or
/// `ContractLocked`. Field ids are not checked against the blueprint here.
pub fn apply_field_value(
    contract: &Contract,
    field_id: &str,
    value: FieldValue,
    now: &str,
) -> Result<Contract, EngineError> {
    check_editable(contract)?;
    let mut next = contract.clone();
    next.field_values.insert(field_id.to_string(), value);
    next.updated_at = now.to_string();
    Ok(next)
}
