//! Blueprint creation rules.

use contractflow_model::{Blueprint, Field, FieldType};

use crate::error::EngineError;
use crate::ids::{IdGenerator, FIELD_ID_LEN, FIELD_ID_PREFIX};

/// A field requested for a new blueprint; the engine assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewField {
    pub field_type: FieldType,
    pub label: String,
}

impl NewField {
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
        }
    }
}

/// Human placeholder shown for an empty field of this type.
pub fn render_field_placeholder(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text => "freeform text",
        FieldType::Date => "date",
        FieldType::Signature => "signature area",
        FieldType::Checkbox => "boolean toggle",
    }
}

/// Creation gate: a non-blank name, at least one field, every field
/// labeled. Nothing may be persisted when this fails.
pub fn validate_blueprint_request(name: &str, fields: &[NewField]) -> Result<(), EngineError> {
    if name.trim().is_empty() {
        return Err(EngineError::validation("blueprint name must not be empty"));
    }
    if fields.is_empty() {
        return Err(EngineError::validation(
            "blueprint must define at least one field",
        ));
    }
    if let Some(pos) = fields.iter().position(|f| f.label.trim().is_empty()) {
        return Err(EngineError::validation(format!(
            "field #{} has an empty label",
            pos + 1
        )));
    }
    Ok(())
}

/// Assign ids to requested fields, keeping request order. Ids are unique
/// within the returned list; a generator that keeps repeating itself fails
/// after `max_attempts` tries for one field.
pub(crate) fn assign_field_ids(
    fields: Vec<NewField>,
    ids: &dyn IdGenerator,
    max_attempts: u32,
) -> Result<Vec<Field>, EngineError> {
    let mut assigned: Vec<Field> = Vec::with_capacity(fields.len());
    for requested in fields {
        let mut attempt = 0;
        let id = loop {
            attempt += 1;
            let candidate = ids.generate(FIELD_ID_PREFIX, FIELD_ID_LEN);
            if !assigned.iter().any(|f| f.id == candidate) {
                break candidate;
            }
            if attempt >= max_attempts {
                return Err(EngineError::DuplicateId {
                    kind: "field",
                    id: candidate,
                });
            }
        };
        assigned.push(Field {
            id,
            field_type: requested.field_type,
            label: requested.label,
        });
    }
    Ok(assigned)
}

/// In-memory blueprint under construction, mirroring a field editor: fields
/// are added one at a time and may be removed before publishing.
///
/// Publish with [`crate::Engine::publish_blueprint`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlueprintDraft {
    name: String,
    description: String,
    fields: Vec<NewField>,
}

impl BlueprintDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fields(&self) -> &[NewField] {
        &self.fields
    }

    /// Append a field. An empty label is refused and the draft is unchanged.
    pub fn add_field(
        &mut self,
        field_type: FieldType,
        label: impl Into<String>,
    ) -> Result<(), EngineError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(EngineError::validation("field label must not be empty"));
        }
        self.fields.push(NewField::new(field_type, label));
        Ok(())
    }

    /// Remove the field at `index`, if any.
    pub fn remove_field(&mut self, index: usize) -> Option<NewField> {
        if index < self.fields.len() {
            Some(self.fields.remove(index))
        } else {
            None
        }
    }

    pub fn is_publishable(&self) -> bool {
        validate_blueprint_request(&self.name, &self.fields).is_ok()
    }

    pub(crate) fn into_parts(self) -> (String, String, Vec<NewField>) {
        (self.name, self.description, self.fields)
    }
}

/// Build the blueprint record for an already-validated request.
pub(crate) fn build_blueprint(
    id: String,
    name: &str,
    description: &str,
    fields: Vec<Field>,
    created_at: String,
) -> Blueprint {
    Blueprint {
        id,
        name: name.to_string(),
        description: description.to_string(),
        fields,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Cycle {
        next: AtomicUsize,
        tokens: Vec<&'static str>,
    }

    impl IdGenerator for Cycle {
        fn generate(&self, prefix: &str, _length: usize) -> String {
            let i = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}{}", prefix, self.tokens[i % self.tokens.len()])
        }
    }

    #[test]
    fn placeholders_per_type() {
        assert_eq!(render_field_placeholder(FieldType::Text), "freeform text");
        assert_eq!(render_field_placeholder(FieldType::Date), "date");
        assert_eq!(render_field_placeholder(FieldType::Signature), "signature area");
        assert_eq!(render_field_placeholder(FieldType::Checkbox), "boolean toggle");
    }

    #[test]
    fn request_gate() {
        let one = vec![NewField::new(FieldType::Text, "Tenant")];
        assert!(validate_blueprint_request("Lease", &one).is_ok());
        assert!(matches!(
            validate_blueprint_request("", &[]),
            Err(EngineError::Validation { .. })
        ));
        assert!(validate_blueprint_request("X", &[]).is_err());
        assert!(validate_blueprint_request("   ", &one).is_err());
        let unlabeled = vec![
            NewField::new(FieldType::Text, "Tenant"),
            NewField::new(FieldType::Date, ""),
        ];
        let err = validate_blueprint_request("Lease", &unlabeled).unwrap_err();
        assert!(err.to_string().contains("field #2"));
    }

    #[test]
    fn field_ids_skip_repeats_within_blueprint() {
        let ids = Cycle {
            tokens: vec!["AAAA0001", "AAAA0001", "BBBB0002"],
            ..Default::default()
        };
        let fields = assign_field_ids(
            vec![
                NewField::new(FieldType::Text, "A"),
                NewField::new(FieldType::Date, "B"),
            ],
            &ids,
            5,
        )
        .unwrap();
        assert_eq!(fields[0].id, "FLD-AAAA0001");
        assert_eq!(fields[1].id, "FLD-BBBB0002");
        assert_eq!(fields[1].label, "B");
    }

    #[test]
    fn stuck_generator_gives_duplicate_id() {
        let ids = Cycle {
            tokens: vec!["SAME0000"],
            ..Default::default()
        };
        let err = assign_field_ids(
            vec![
                NewField::new(FieldType::Text, "A"),
                NewField::new(FieldType::Text, "B"),
            ],
            &ids,
            3,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateId { kind: "field", .. }));
    }

    #[test]
    fn draft_add_and_remove() {
        let mut draft = BlueprintDraft::new("NDA").with_description("mutual");
        assert!(!draft.is_publishable());
        draft.add_field(FieldType::Text, "Party").unwrap();
        draft.add_field(FieldType::Checkbox, "Agree").unwrap();
        assert!(draft.add_field(FieldType::Date, "  ").is_err());
        assert_eq!(draft.fields().len(), 2);
        assert!(draft.is_publishable());

        let removed = draft.remove_field(0).unwrap();
        assert_eq!(removed.label, "Party");
        assert_eq!(draft.fields()[0].label, "Agree");
        assert!(draft.remove_field(5).is_none());

        draft.remove_field(0);
        assert!(!draft.is_publishable());
    }
}
