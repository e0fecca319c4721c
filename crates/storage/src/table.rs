//! Insertion-ordered record table shared by the bundled backends.

use contractflow_model::{Blueprint, Contract};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Collection, StorageError};

/// A persisted record addressable by id.
pub(crate) trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

impl Record for Blueprint {
    const COLLECTION: Collection = Collection::Blueprints;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Contract {
    const COLLECTION: Collection = Collection::Contracts;

    fn id(&self) -> &str {
        &self.id
    }
}

/// One collection, kept in insertion order.
#[derive(Debug, Clone)]
pub(crate) struct Table<R> {
    rows: Vec<R>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Record> Table<R> {
    /// Build a table from previously persisted rows, rejecting repeated ids.
    pub(crate) fn from_rows(rows: Vec<R>) -> Result<Self, StorageError> {
        let mut table = Self::default();
        for row in rows {
            if table.position(row.id()).is_some() {
                return Err(StorageError::Backend(format!(
                    "persisted {} collection repeats id {}",
                    R::COLLECTION,
                    row.id()
                )));
            }
            table.rows.push(row);
        }
        Ok(table)
    }

    pub(crate) fn rows(&self) -> &[R] {
        &self.rows
    }

    pub(crate) fn get(&self, id: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id() == id)
    }

    /// Check-then-insert; the check and the push happen under the same
    /// borrow so no other writer can interleave.
    pub(crate) fn append(&mut self, record: R) -> Result<(), StorageError> {
        if self.position(record.id()).is_some() {
            return Err(StorageError::DuplicateId {
                collection: R::COLLECTION,
                id: record.id().to_string(),
            });
        }
        self.rows.push(record);
        Ok(())
    }

    pub(crate) fn replace(&mut self, record: R) -> Result<(), StorageError> {
        self.replace_checked(record, |_| Ok(()))
    }

    /// Overwrite the record sharing `record`'s id after `check` accepts the
    /// currently stored version.
    pub(crate) fn replace_checked<F>(&mut self, record: R, check: F) -> Result<(), StorageError>
    where
        F: FnOnce(&R) -> Result<(), StorageError>,
    {
        let index = self
            .position(record.id())
            .ok_or_else(|| StorageError::NotFound {
                collection: R::COLLECTION,
                id: record.id().to_string(),
            })?;
        check(&self.rows[index])?;
        self.rows[index] = record;
        Ok(())
    }
}

/// The `updatedAt` compare-and-swap check used by
/// `replace_contract_if_unchanged`.
pub(crate) fn expect_updated_at(
    expected_updated_at: &str,
) -> impl FnOnce(&Contract) -> Result<(), StorageError> + '_ {
    move |current: &Contract| {
        if current.updated_at == expected_updated_at {
            Ok(())
        } else {
            Err(StorageError::ConcurrentConflict {
                id: current.id.clone(),
                expected_updated_at: expected_updated_at.to_string(),
                actual_updated_at: current.updated_at.clone(),
            })
        }
    }
}
