//! Working copies of persisted contracts.
//!
//! Field edits are staged on a [`DraftContract`] and become durable only
//! when the draft is committed through the engine, either on its own
//! ([`crate::Engine::commit_draft`]) or together with a status transition
//! ([`crate::Engine::advance_draft`]). The draft remembers the `updatedAt`
//! it was opened at; committing a draft whose contract has since moved on
//! fails with [`EngineError::Conflict`].

use std::sync::Arc;

use contractflow_model::{Contract, ContractStatus, Field, FieldValue};

use crate::clock::{timestamp, Clock};
use crate::error::EngineError;
use crate::lifecycle;

/// Which field ids a draft accepts.
#[derive(Debug, Clone)]
pub(crate) enum FieldSchema {
    /// Any id, any value kind.
    Open,
    /// Only ids from the blueprint, with values of the matching kind.
    Strict(Vec<Field>),
}

#[derive(Debug, Clone)]
pub struct DraftContract {
    working: Contract,
    base_updated_at: String,
    dirty: bool,
    schema: FieldSchema,
    clock: Arc<dyn Clock>,
}

impl DraftContract {
    pub(crate) fn open(contract: Contract, schema: FieldSchema, clock: Arc<dyn Clock>) -> Self {
        Self {
            base_updated_at: contract.updated_at.clone(),
            working: contract,
            dirty: false,
            schema,
            clock,
        }
    }

    /// The working copy, staged values included.
    pub fn contract(&self) -> &Contract {
        &self.working
    }

    pub fn id(&self) -> &str {
        &self.working.id
    }

    pub fn status(&self) -> ContractStatus {
        self.working.status
    }

    pub fn is_locked(&self) -> bool {
        lifecycle::is_locked(self.working.status)
    }

    /// Statuses this draft can be advanced to; empty for terminal contracts.
    pub fn next_statuses(&self) -> &'static [ContractStatus] {
        lifecycle::next_statuses(self.working.status)
    }

    /// Whether any field value has been staged since the draft was opened.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The persisted `updatedAt` this draft was opened at.
    pub fn base_updated_at(&self) -> &str {
        &self.base_updated_at
    }

    /// Stage `value` for `field_id` in the working copy.
    ///
    /// Fails with `ContractLocked` on terminal contracts; in strict mode
    /// also with `UnknownField` or `Validation`. A refused edit leaves the
    /// draft unchanged.
    pub fn set_field_value(
        &mut self,
        field_id: &str,
        value: impl Into<FieldValue>,
    ) -> Result<&Contract, EngineError> {
        let value = value.into();
        lifecycle::check_editable(&self.working)?;
        if let FieldSchema::Strict(fields) = &self.schema {
            let field = fields
                .iter()
                .find(|f| f.id == field_id)
                .ok_or_else(|| EngineError::UnknownField {
                    contract_id: self.working.id.clone(),
                    field_id: field_id.to_string(),
                })?;
            if !value.fits(field.field_type) {
                return Err(EngineError::validation(format!(
                    "field {} ({}) cannot hold {:?}",
                    field.id, field.field_type, value
                )));
            }
        }

        let now = timestamp(self.clock.as_ref())?;
        self.working = lifecycle::apply_field_value(&self.working, field_id, value, &now)?;
        self.dirty = true;
        tracing::debug!(contract_id = %self.working.id, field_id, "staged field value");
        Ok(&self.working)
    }

    pub(crate) fn into_parts(self) -> (Contract, String, bool) {
        (self.working, self.base_updated_at, self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use contractflow_model::FieldType;

    fn contract_at(status: ContractStatus) -> Contract {
        Contract {
            id: "CTR-DRAFT1".to_string(),
            name: "Draft".to_string(),
            blueprint_id: "BP-DRAFT".to_string(),
            status,
            field_values: Default::default(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn strict_fields() -> Vec<Field> {
        vec![
            Field {
                id: "name".to_string(),
                field_type: FieldType::Text,
                label: "Name".to_string(),
            },
            Field {
                id: "agree".to_string(),
                field_type: FieldType::Checkbox,
                label: "Agree".to_string(),
            },
        ]
    }

    #[test]
    fn staging_marks_dirty_and_keeps_base_stamp() {
        let mut draft = DraftContract::open(
            contract_at(ContractStatus::Approved),
            FieldSchema::Open,
            Arc::new(SystemClock),
        );
        assert!(!draft.is_dirty());
        draft.set_field_value("anything", "value").unwrap();
        assert!(draft.is_dirty());
        assert_eq!(draft.base_updated_at(), "2025-01-01T00:00:00Z");
        assert_ne!(draft.contract().updated_at, "2025-01-01T00:00:00Z");
        assert_eq!(
            draft.contract().field_value("anything"),
            Some(&FieldValue::from("value"))
        );
    }

    #[test]
    fn locked_draft_refuses_edits() {
        for status in [ContractStatus::Locked, ContractStatus::Revoked] {
            let mut draft =
                DraftContract::open(contract_at(status), FieldSchema::Open, Arc::new(SystemClock));
            let err = draft.set_field_value("f", true).unwrap_err();
            assert!(matches!(err, EngineError::ContractLocked { .. }));
            assert!(!draft.is_dirty());
            assert!(draft.contract().field_values.is_empty());
            assert!(draft.next_statuses().is_empty());
        }
    }

    #[test]
    fn strict_schema_checks_id_and_kind() {
        let mut draft = DraftContract::open(
            contract_at(ContractStatus::Created),
            FieldSchema::Strict(strict_fields()),
            Arc::new(SystemClock),
        );
        assert!(matches!(
            draft.set_field_value("unknown", "x"),
            Err(EngineError::UnknownField { .. })
        ));
        assert!(matches!(
            draft.set_field_value("agree", "yes"),
            Err(EngineError::Validation { .. })
        ));
        assert!(matches!(
            draft.set_field_value("name", false),
            Err(EngineError::Validation { .. })
        ));
        assert!(!draft.is_dirty());

        draft.set_field_value("agree", true).unwrap();
        draft.set_field_value("name", "Jane").unwrap();
        assert_eq!(draft.contract().field_values.len(), 2);
    }
}
