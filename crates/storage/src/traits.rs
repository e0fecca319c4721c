use async_trait::async_trait;
use contractflow_model::{Blueprint, Contract};

use crate::error::StorageError;

/// The persistence gateway for ContractFlow.
///
/// A `ContractStore` holds two independent collections, blueprints and
/// contracts, each a mapping from id to record that remembers insertion
/// order.
///
/// ## Write Semantics
///
/// Every mutating call durably persists the full snapshot of the affected
/// collection before returning. There are no partial or incremental writes.
/// `append_*` performs its existence check and insert atomically and
/// returns `Err(StorageError::DuplicateId)` on collision. `replace_*` is
/// last-writer-wins; `replace_contract_if_unchanged` is the
/// compare-and-swap variant for callers that hold a working copy.
///
/// ## Consistency
///
/// Implementations must give read-your-writes consistency: a successful
/// mutation is visible to every subsequent read on the same store.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` so an engine holding
/// one can be shared across async task boundaries.
#[async_trait]
pub trait ContractStore: Send + Sync + 'static {
    // ── Blueprints ───────────────────────────────────────────────────────────

    /// All blueprints in insertion order.
    async fn list_blueprints(&self) -> Result<Vec<Blueprint>, StorageError>;

    /// The blueprint with this id, or `None`.
    async fn get_blueprint(&self, id: &str) -> Result<Option<Blueprint>, StorageError>;

    /// Add a new blueprint.
    ///
    /// Returns `Err(StorageError::DuplicateId)` if the id is already present.
    async fn append_blueprint(&self, record: Blueprint) -> Result<(), StorageError>;

    /// Overwrite the blueprint sharing `record.id`.
    ///
    /// Returns `Err(StorageError::NotFound)` if no blueprint has that id.
    async fn replace_blueprint(&self, record: Blueprint) -> Result<(), StorageError>;

    // ── Contracts ────────────────────────────────────────────────────────────

    /// All contracts in insertion order.
    async fn list_contracts(&self) -> Result<Vec<Contract>, StorageError>;

    /// The contract with this id, or `None`.
    async fn get_contract(&self, id: &str) -> Result<Option<Contract>, StorageError>;

    /// Add a new contract.
    ///
    /// Returns `Err(StorageError::DuplicateId)` if the id is already present.
    async fn append_contract(&self, record: Contract) -> Result<(), StorageError>;

    /// Overwrite the contract sharing `record.id`.
    ///
    /// Returns `Err(StorageError::NotFound)` if no contract has that id.
    async fn replace_contract(&self, record: Contract) -> Result<(), StorageError>;

    /// Overwrite the contract sharing `record.id` only if the stored
    /// contract's `updated_at` still equals `expected_updated_at`.
    ///
    /// Returns `Err(StorageError::ConcurrentConflict)` if the stamp moved,
    /// `Err(StorageError::NotFound)` if no contract has that id.
    async fn replace_contract_if_unchanged(
        &self,
        record: Contract,
        expected_updated_at: &str,
    ) -> Result<(), StorageError>;
}
