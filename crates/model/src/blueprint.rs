use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A named, ordered schema of typed fields.
///
/// Field order is the document layout order. A stored blueprint always has
/// at least one field; that is enforced at creation, not on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<Field>,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub created_at: String,
}

impl Blueprint {
    /// Look up a field by id.
    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn lease() -> Blueprint {
        Blueprint {
            id: "BP-AB12C".to_string(),
            name: "Lease".to_string(),
            description: String::new(),
            fields: vec![
                Field {
                    id: "FLD-TENANT01".to_string(),
                    field_type: FieldType::Text,
                    label: "Tenant".to_string(),
                },
                Field {
                    id: "FLD-START001".to_string(),
                    field_type: FieldType::Date,
                    label: "Start".to_string(),
                },
            ],
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn field_lookup_by_id() {
        let bp = lease();
        assert_eq!(bp.field("FLD-START001").map(|f| f.field_type), Some(FieldType::Date));
        assert!(bp.field("FLD-MISSING").is_none());
        assert_eq!(bp.field_count(), 2);
    }

    #[test]
    fn json_layout_is_camel_case_and_ordered() {
        let json = serde_json::to_value(lease()).unwrap();
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00Z");
        let labels: Vec<&str> = json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["Tenant", "Start"]);
    }

    #[test]
    fn missing_description_reads_as_empty() {
        let json = serde_json::json!({
            "id": "BP-X0000",
            "name": "NDA",
            "fields": [{ "id": "f1", "type": "CHECKBOX", "label": "Agree" }],
            "createdAt": "2025-01-01T00:00:00Z"
        });
        let bp: Blueprint = serde_json::from_value(json).unwrap();
        assert_eq!(bp.description, "");
    }
}
