use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldValue;
use crate::status::ContractStatus;

/// Field id -> value. Absent keys are unset fields.
pub type FieldValues = BTreeMap<String, FieldValue>;

/// An instance of a blueprint carrying field values and a lifecycle status.
///
/// `blueprint_id` is a weak reference: the contract never owns its
/// blueprint and the reference may fail to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub name: String,
    pub blueprint_id: String,
    pub status: ContractStatus,
    #[serde(default)]
    pub field_values: FieldValues,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub created_at: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub updated_at: String,
}

impl Contract {
    pub fn field_value(&self, field_id: &str) -> Option<&FieldValue> {
        self.field_values.get(field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_persisted_contract() {
        let json = serde_json::json!({
            "id": "CTR-Q1W2E3",
            "name": "Lease A",
            "blueprintId": "BP-AB12C",
            "status": "SENT",
            "fieldValues": { "tenant": "Jane", "agree": true },
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z"
        });
        let contract: Contract = serde_json::from_value(json).unwrap();
        assert_eq!(contract.status, ContractStatus::Sent);
        assert_eq!(contract.field_value("tenant"), Some(&FieldValue::from("Jane")));
        assert_eq!(contract.field_value("agree"), Some(&FieldValue::Flag(true)));
        assert_eq!(contract.field_value("other"), None);
    }

    #[test]
    fn unknown_status_fails_to_decode() {
        let json = serde_json::json!({
            "id": "CTR-Q1W2E3",
            "name": "Lease A",
            "blueprintId": "BP-AB12C",
            "status": "ARCHIVED",
            "fieldValues": {},
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        });
        let err = serde_json::from_value::<Contract>(json).unwrap_err();
        assert!(err.to_string().contains("ARCHIVED"));
    }
}
