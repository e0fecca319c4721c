use async_trait::async_trait;
use contractflow_model::{Blueprint, Contract};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::table::{expect_updated_at, Table};
use crate::traits::ContractStore;

/// In-process store. Nothing outlives the value; "durable" means visible to
/// every later read on the same instance.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blueprints: RwLock<Table<Blueprint>>,
    contracts: RwLock<Table<Contract>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractStore for MemoryStore {
    async fn list_blueprints(&self) -> Result<Vec<Blueprint>, StorageError> {
        Ok(self.blueprints.read().await.rows().to_vec())
    }

    async fn get_blueprint(&self, id: &str) -> Result<Option<Blueprint>, StorageError> {
        Ok(self.blueprints.read().await.get(id).cloned())
    }

    async fn append_blueprint(&self, record: Blueprint) -> Result<(), StorageError> {
        self.blueprints.write().await.append(record)
    }

    async fn replace_blueprint(&self, record: Blueprint) -> Result<(), StorageError> {
        self.blueprints.write().await.replace(record)
    }

    async fn list_contracts(&self) -> Result<Vec<Contract>, StorageError> {
        Ok(self.contracts.read().await.rows().to_vec())
    }

    async fn get_contract(&self, id: &str) -> Result<Option<Contract>, StorageError> {
        Ok(self.contracts.read().await.get(id).cloned())
    }

    async fn append_contract(&self, record: Contract) -> Result<(), StorageError> {
        self.contracts.write().await.append(record)
    }

    async fn replace_contract(&self, record: Contract) -> Result<(), StorageError> {
        self.contracts.write().await.replace(record)
    }

    async fn replace_contract_if_unchanged(
        &self,
        record: Contract,
        expected_updated_at: &str,
    ) -> Result<(), StorageError> {
        self.contracts
            .write()
            .await
            .replace_checked(record, expect_updated_at(expected_updated_at))
    }
}
