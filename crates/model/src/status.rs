use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Lifecycle status of a contract.
///
/// The linear lifecycle is CREATED < APPROVED < SENT < SIGNED < LOCKED.
/// REVOKED is an out-of-band terminal branch with no rank in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum ContractStatus {
    Created,
    Approved,
    Sent,
    Signed,
    Locked,
    Revoked,
}

impl ContractStatus {
    /// Every status, in declaration order.
    pub const ALL: [ContractStatus; 6] = [
        ContractStatus::Created,
        ContractStatus::Approved,
        ContractStatus::Sent,
        ContractStatus::Signed,
        ContractStatus::Locked,
        ContractStatus::Revoked,
    ];

    /// The upper-case wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Created => "CREATED",
            ContractStatus::Approved => "APPROVED",
            ContractStatus::Sent => "SENT",
            ContractStatus::Signed => "SIGNED",
            ContractStatus::Locked => "LOCKED",
            ContractStatus::Revoked => "REVOKED",
        }
    }

    /// Position in the linear lifecycle, or `None` for REVOKED.
    pub fn lifecycle_rank(self) -> Option<u8> {
        match self {
            ContractStatus::Created => Some(0),
            ContractStatus::Approved => Some(1),
            ContractStatus::Sent => Some(2),
            ContractStatus::Signed => Some(3),
            ContractStatus::Locked => Some(4),
            ContractStatus::Revoked => None,
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ModelError::UnknownEnumValue {
                kind: "contract status",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for ContractStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_tag() {
        for status in ContractStatus::ALL {
            assert_eq!(status.as_str().parse::<ContractStatus>(), Ok(status));
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "ARCHIVED".parse::<ContractStatus>().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownEnumValue {
                kind: "contract status",
                value: "ARCHIVED".to_string(),
            }
        );
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!("created".parse::<ContractStatus>().is_err());
    }

    #[test]
    fn revoked_has_no_rank() {
        assert_eq!(ContractStatus::Revoked.lifecycle_rank(), None);
        let ranks: Vec<u8> = ContractStatus::ALL
            .iter()
            .filter_map(|s| s.lifecycle_rank())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn serde_uses_wire_tags() {
        let json = serde_json::to_string(&ContractStatus::Approved).unwrap();
        assert_eq!(json, "\"APPROVED\"");
        let back: ContractStatus = serde_json::from_str("\"LOCKED\"").unwrap();
        assert_eq!(back, ContractStatus::Locked);
    }

    #[test]
    fn serde_reports_unknown_tag() {
        let err = serde_json::from_str::<ContractStatus>("\"DRAFT\"").unwrap_err();
        assert!(err.to_string().contains("unknown contract status value: 'DRAFT'"));
    }
}
