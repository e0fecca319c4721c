//! File-backed store: one JSON array per collection in a data directory.
//!
//! Layout:
//!
//! ```text
//! <data_dir>/blueprints.json   [ {Blueprint}, ... ]   insertion order
//! <data_dir>/contracts.json    [ {Contract}, ... ]    insertion order
//! ```
//!
//! Every mutation rewrites the whole collection file: the new snapshot is
//! written to a `.tmp` sibling and renamed over the old file, so a reader
//! never sees a half-written array. A missing file is an empty collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use contractflow_model::{Blueprint, Contract};
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::table::{expect_updated_at, Record, Table};
use crate::traits::ContractStore;

#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    blueprints: Mutex<Table<Blueprint>>,
    contracts: Mutex<Table<Contract>>,
}

impl JsonFileStore {
    /// Open (creating if needed) the data directory and load both
    /// collections into memory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error("create data directory", &dir, e))?;

        let blueprints = load::<Blueprint>(&dir).await?;
        let contracts = load::<Contract>(&dir).await?;
        tracing::debug!(
            dir = %dir.display(),
            blueprints = blueprints.rows().len(),
            contracts = contracts.rows().len(),
            "opened json file store"
        );

        Ok(Self {
            dir,
            blueprints: Mutex::new(blueprints),
            contracts: Mutex::new(contracts),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    /// Apply `change` to a copy of the table, persist the copy, and only
    /// then swap it in. A failed write leaves the in-memory view untouched.
    async fn mutate<R, F>(&self, table: &Mutex<Table<R>>, change: F) -> Result<(), StorageError>
    where
        R: Record,
        F: FnOnce(&mut Table<R>) -> Result<(), StorageError>,
    {
        let mut guard = table.lock().await;
        let mut next = guard.clone();
        change(&mut next)?;
        persist(&self.dir, next.rows()).await?;
        *guard = next;
        Ok(())
    }
}

fn collection_path<R: Record>(dir: &Path) -> PathBuf {
    dir.join(R::COLLECTION.file_name())
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Backend(format!("could not {} '{}': {}", action, path.display(), e))
}

async fn load<R: Record>(dir: &Path) -> Result<Table<R>, StorageError> {
    let path = collection_path::<R>(dir);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Table::default()),
        Err(e) => return Err(io_error("read", &path, e)),
    };
    let rows: Vec<R> = serde_json::from_slice(&bytes).map_err(|e| {
        StorageError::Backend(format!("could not parse '{}': {}", path.display(), e))
    })?;
    Table::from_rows(rows)
}

async fn persist<R: Record>(dir: &Path, rows: &[R]) -> Result<(), StorageError> {
    let path = collection_path::<R>(dir);
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(rows).map_err(|e| {
        StorageError::Backend(format!("could not serialize {} collection: {}", R::COLLECTION, e))
    })?;
    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|e| io_error("write", &tmp, e))?;
    tokio::fs::rename(&tmp, &path)
        .await
        .map_err(|e| io_error("replace", &path, e))?;
    tracing::debug!(
        collection = %R::COLLECTION,
        rows = rows.len(),
        path = %path.display(),
        "persisted collection snapshot"
    );
    Ok(())
}

#[async_trait]
impl ContractStore for JsonFileStore {
    async fn list_blueprints(&self) -> Result<Vec<Blueprint>, StorageError> {
        Ok(self.blueprints.lock().await.rows().to_vec())
    }

    async fn get_blueprint(&self, id: &str) -> Result<Option<Blueprint>, StorageError> {
        Ok(self.blueprints.lock().await.get(id).cloned())
    }

    async fn append_blueprint(&self, record: Blueprint) -> Result<(), StorageError> {
        self.mutate(&self.blueprints, |t| t.append(record)).await
    }

    async fn replace_blueprint(&self, record: Blueprint) -> Result<(), StorageError> {
        self.mutate(&self.blueprints, |t| t.replace(record)).await
    }

    async fn list_contracts(&self) -> Result<Vec<Contract>, StorageError> {
        Ok(self.contracts.lock().await.rows().to_vec())
    }

    async fn get_contract(&self, id: &str) -> Result<Option<Contract>, StorageError> {
        Ok(self.contracts.lock().await.get(id).cloned())
    }

    async fn append_contract(&self, record: Contract) -> Result<(), StorageError> {
        self.mutate(&self.contracts, |t| t.append(record)).await
    }

    async fn replace_contract(&self, record: Contract) -> Result<(), StorageError> {
        self.mutate(&self.contracts, |t| t.replace(record)).await
    }

    async fn replace_contract_if_unchanged(
        &self,
        record: Contract,
        expected_updated_at: &str,
    ) -> Result<(), StorageError> {
        self.mutate(&self.contracts, |t| {
            t.replace_checked(record, expect_updated_at(expected_updated_at))
        })
        .await
    }
}
