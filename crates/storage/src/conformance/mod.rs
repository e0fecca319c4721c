//! Conformance test suite for `ContractStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `ContractStore` implementation can run to verify correctness. The suite
//! covers:
//!
//! - **Append**: record creation, duplicate-id rejection, collection independence
//! - **Read**: insertion order, absent lookups, idempotent reads, value round-trip
//! - **Replace**: overwrite semantics and `NotFound` for unknown ids
//! - **Version**: the `updatedAt` compare-and-swap replace
//! - **Error**: error variants carry the offending collection and id
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function that
//! creates a fresh, empty store for each test:
//!
//! ```ignore
//! use contractflow_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn memory_conformance() {
//!     let report = run_conformance_suite(|| async { MemoryStore::new() }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod append;
mod error;
mod read;
mod replace;
mod version;

use std::fmt;
use std::future::Future;

use contractflow_model::{Blueprint, Contract, ContractStatus, Field, FieldType};

use crate::ContractStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "append", "read", "version").
    pub category: String,
    /// Test name (e.g. "duplicate_contract_id_rejected").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn pass(category: &str, name: &str) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: true,
            message: None,
        }
    }

    fn fail(category: &str, name: &str, msg: String) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: false,
            message: Some(msg),
        }
    }

    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::pass(category, name),
            Err(msg) => Self::fail(category, name, msg),
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// store, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(append::run_append_tests(&factory).await);
    results.extend(read::run_read_tests(&factory).await);
    results.extend(replace::run_replace_tests(&factory).await);
    results.extend(version::run_version_tests(&factory).await);
    results.extend(error::run_error_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers: record constructors with sensible defaults ──────────────────────

fn make_blueprint(id: &str, name: &str) -> Blueprint {
    Blueprint {
        id: id.to_string(),
        name: name.to_string(),
        description: "conformance blueprint".to_string(),
        fields: vec![
            Field {
                id: "FLD-TEXT0001".to_string(),
                field_type: FieldType::Text,
                label: "Party".to_string(),
            },
            Field {
                id: "FLD-CHECK001".to_string(),
                field_type: FieldType::Checkbox,
                label: "Accepted".to_string(),
            },
        ],
        created_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

fn make_contract(id: &str, status: ContractStatus, updated_at: &str) -> Contract {
    Contract {
        id: id.to_string(),
        name: format!("Contract {}", id),
        blueprint_id: "BP-CONF1".to_string(),
        status,
        field_values: Default::default(),
        created_at: "2025-01-01T00:00:00Z".to_string(),
        updated_at: updated_at.to_string(),
    }
}
