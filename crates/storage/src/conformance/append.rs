use std::future::Future;

use contractflow_model::ContractStatus;

use super::{make_blueprint, make_contract, TestResult};
use crate::{ContractStore, StorageError};

pub(super) async fn run_append_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "append",
        "append_blueprint_then_get",
        append_blueprint_then_get(factory).await,
    ));
    results.push(TestResult::from_result(
        "append",
        "append_contract_then_get",
        append_contract_then_get(factory).await,
    ));
    results.push(TestResult::from_result(
        "append",
        "duplicate_blueprint_id_rejected",
        duplicate_blueprint_id_rejected(factory).await,
    ));
    results.push(TestResult::from_result(
        "append",
        "duplicate_contract_id_rejected",
        duplicate_contract_id_rejected(factory).await,
    ));
    results.push(TestResult::from_result(
        "append",
        "collections_are_independent",
        collections_are_independent(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// An appended blueprint is readable by id and equal to what was written.
async fn append_blueprint_then_get<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let bp = make_blueprint("BP-AAAAA", "Lease");
    s.append_blueprint(bp.clone())
        .await
        .map_err(|e| e.to_string())?;

    let got = s
        .get_blueprint("BP-AAAAA")
        .await
        .map_err(|e| e.to_string())?;
    if got.as_ref() != Some(&bp) {
        return Err(format!("expected {:?}, got {:?}", bp, got));
    }
    Ok(())
}

/// An appended contract is readable by id and equal to what was written.
async fn append_contract_then_get<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let c = make_contract("CTR-AAAAAA", ContractStatus::Created, "t0");
    s.append_contract(c.clone())
        .await
        .map_err(|e| e.to_string())?;

    let got = s
        .get_contract("CTR-AAAAAA")
        .await
        .map_err(|e| e.to_string())?;
    if got.as_ref() != Some(&c) {
        return Err(format!("expected {:?}, got {:?}", c, got));
    }
    Ok(())
}

/// A second blueprint with the same id is refused and the first survives.
async fn duplicate_blueprint_id_rejected<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_blueprint(make_blueprint("BP-DUPE1", "First"))
        .await
        .map_err(|e| e.to_string())?;

    match s
        .append_blueprint(make_blueprint("BP-DUPE1", "Second"))
        .await
    {
        Err(StorageError::DuplicateId { .. }) => {}
        other => return Err(format!("expected DuplicateId, got {:?}", other)),
    }

    let all = s.list_blueprints().await.map_err(|e| e.to_string())?;
    if all.len() != 1 || all[0].name != "First" {
        return Err(format!(
            "expected only the first blueprint to remain, got {:?}",
            all
        ));
    }
    Ok(())
}

/// A second contract with the same id is refused and the first survives.
async fn duplicate_contract_id_rejected<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_contract(make_contract("CTR-DUPE01", ContractStatus::Created, "t0"))
        .await
        .map_err(|e| e.to_string())?;

    match s
        .append_contract(make_contract("CTR-DUPE01", ContractStatus::Sent, "t1"))
        .await
    {
        Err(StorageError::DuplicateId { .. }) => {}
        other => return Err(format!("expected DuplicateId, got {:?}", other)),
    }

    let all = s.list_contracts().await.map_err(|e| e.to_string())?;
    if all.len() != 1 || all[0].status != ContractStatus::Created {
        return Err(format!(
            "expected only the first contract to remain, got {:?}",
            all
        ));
    }
    Ok(())
}

/// The same id may exist once in each collection.
async fn collections_are_independent<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_blueprint(make_blueprint("SHARED", "Blueprint"))
        .await
        .map_err(|e| e.to_string())?;
    s.append_contract(make_contract("SHARED", ContractStatus::Created, "t0"))
        .await
        .map_err(|e| e.to_string())?;

    let blueprints = s.list_blueprints().await.map_err(|e| e.to_string())?;
    let contracts = s.list_contracts().await.map_err(|e| e.to_string())?;
    if blueprints.len() != 1 || contracts.len() != 1 {
        return Err(format!(
            "expected one record per collection, got {} blueprints and {} contracts",
            blueprints.len(),
            contracts.len()
        ));
    }
    Ok(())
}
