use std::future::Future;

use contractflow_model::ContractStatus;

use super::{make_blueprint, make_contract, TestResult};
use crate::{Collection, ContractStore, StorageError};

pub(super) async fn run_error_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "error",
        "duplicate_id_has_correct_fields",
        duplicate_id_has_correct_fields(factory).await,
    ));
    results.push(TestResult::from_result(
        "error",
        "not_found_has_correct_fields",
        not_found_has_correct_fields(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

async fn duplicate_id_has_correct_fields<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_blueprint(make_blueprint("BP-FIELD", "One"))
        .await
        .map_err(|e| e.to_string())?;
    match s.append_blueprint(make_blueprint("BP-FIELD", "Two")).await {
        Err(StorageError::DuplicateId { collection, id }) => {
            if collection != Collection::Blueprints || id != "BP-FIELD" {
                return Err(format!(
                    "expected blueprint/BP-FIELD, got {}/{}",
                    collection, id
                ));
            }
            Ok(())
        }
        other => Err(format!("expected DuplicateId, got {:?}", other)),
    }
}

async fn not_found_has_correct_fields<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s
        .replace_contract(make_contract("CTR-MISSNG", ContractStatus::Created, "t0"))
        .await
    {
        Err(StorageError::NotFound { collection, id }) => {
            if collection != Collection::Contracts || id != "CTR-MISSNG" {
                return Err(format!(
                    "expected contract/CTR-MISSNG, got {}/{}",
                    collection, id
                ));
            }
            Ok(())
        }
        other => Err(format!("expected NotFound, got {:?}", other)),
    }
}
