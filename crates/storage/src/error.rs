use std::fmt;

/// The two persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Blueprints,
    Contracts,
}

impl Collection {
    /// Singular record noun used in error messages.
    pub fn record_kind(self) -> &'static str {
        match self {
            Collection::Blueprints => "blueprint",
            Collection::Contracts => "contract",
        }
    }

    /// File name used by file-backed stores.
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Blueprints => "blueprints.json",
            Collection::Contracts => "contracts.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_kind())
    }
}

/// All errors that can be returned by a ContractStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A record with this id already exists in the collection.
    #[error("duplicate {collection} id: {id}")]
    DuplicateId { collection: Collection, id: String },

    /// No record with this id exists in the collection.
    #[error("{collection} not found: {id}")]
    NotFound { collection: Collection, id: String },

    /// Compare-and-swap replace lost: the stored contract's `updatedAt`
    /// no longer matches the stamp the caller read.
    #[error(
        "concurrent conflict on contract {id}: expected updatedAt {expected_updated_at}, found {actual_updated_at}"
    )]
    ConcurrentConflict {
        id: String,
        expected_updated_at: String,
        actual_updated_at: String,
    },

    /// A backend-specific storage error (I/O, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
