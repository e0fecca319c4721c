use contractflow_model::ContractStatus;
use contractflow_storage::StorageError;

use crate::config::ConfigError;

/// Every way an engine operation can be refused.
///
/// All variants except `Storage`, `Config` and `Timestamp` are
/// precondition violations: nothing was written and retrying the same call
/// gives the same answer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Creation preconditions unmet (empty name, no fields, no blueprint
    /// selected, value of the wrong kind in strict mode).
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// The requested status is not a successor of the current one.
    #[error("invalid transition for contract {contract_id}: {from} -> {to}")]
    InvalidTransition {
        contract_id: String,
        from: ContractStatus,
        to: ContractStatus,
    },

    /// Field edit attempted on a LOCKED or REVOKED contract.
    #[error("contract {contract_id} is {status} and its field values are frozen")]
    ContractLocked {
        contract_id: String,
        status: ContractStatus,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Generated id collided on every allowed attempt.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Strict mode only: the field id is not in the contract's blueprint.
    #[error("field {field_id} is not defined by the blueprint of contract {contract_id}")]
    UnknownField {
        contract_id: String,
        field_id: String,
    },

    /// The working copy is stale: the contract was committed by someone
    /// else after the draft was opened.
    #[error("contract {contract_id} changed after this draft was opened")]
    Conflict { contract_id: String },

    /// Backend failure (I/O, serialization).
    #[error("storage error: {0}")]
    Storage(StorageError),

    /// The engine configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The clock produced an instant RFC 3339 cannot express.
    #[error("could not format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl EngineError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation {
            message: message.into(),
        }
    }
}

impl From<StorageError> for EngineError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::DuplicateId { collection, id } => EngineError::DuplicateId {
                kind: collection.record_kind(),
                id,
            },
            StorageError::NotFound { collection, id } => EngineError::NotFound {
                kind: collection.record_kind(),
                id,
            },
            StorageError::ConcurrentConflict { id, .. } => {
                EngineError::Conflict { contract_id: id }
            }
            other => EngineError::Storage(other),
        }
    }
}
