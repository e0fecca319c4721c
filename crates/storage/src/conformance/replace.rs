use std::future::Future;

use contractflow_model::{ContractStatus, FieldValue};

use super::{make_blueprint, make_contract, TestResult};
use crate::{ContractStore, StorageError};

pub(super) async fn run_replace_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "replace",
        "replace_overwrites_contract",
        replace_overwrites_contract(factory).await,
    ));
    results.push(TestResult::from_result(
        "replace",
        "replace_keeps_list_position",
        replace_keeps_list_position(factory).await,
    ));
    results.push(TestResult::from_result(
        "replace",
        "replace_missing_contract_returns_not_found",
        replace_missing_contract_returns_not_found(factory).await,
    ));
    results.push(TestResult::from_result(
        "replace",
        "replace_overwrites_blueprint",
        replace_overwrites_blueprint(factory).await,
    ));
    results.push(TestResult::from_result(
        "replace",
        "replace_missing_blueprint_returns_not_found",
        replace_missing_blueprint_returns_not_found(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// Replace swaps in every field of the record, values included.
async fn replace_overwrites_contract<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_contract(make_contract("CTR-REPL01", ContractStatus::Created, "t0"))
        .await
        .map_err(|e| e.to_string())?;

    let mut updated = make_contract("CTR-REPL01", ContractStatus::Approved, "t1");
    updated
        .field_values
        .insert("FLD-TEXT0001".to_string(), FieldValue::from("Jane"));
    s.replace_contract(updated.clone())
        .await
        .map_err(|e| e.to_string())?;

    let got = s
        .get_contract("CTR-REPL01")
        .await
        .map_err(|e| e.to_string())?;
    if got.as_ref() != Some(&updated) {
        return Err(format!("expected {:?}, got {:?}", updated, got));
    }
    Ok(())
}

/// A replaced record keeps its original insertion slot.
async fn replace_keeps_list_position<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    for id in ["CTR-FIRST1", "CTR-MIDDLE", "CTR-LAST01"] {
        s.append_contract(make_contract(id, ContractStatus::Created, "t0"))
            .await
            .map_err(|e| e.to_string())?;
    }
    s.replace_contract(make_contract("CTR-FIRST1", ContractStatus::Revoked, "t1"))
        .await
        .map_err(|e| e.to_string())?;

    let all = s.list_contracts().await.map_err(|e| e.to_string())?;
    let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
    if ids != ["CTR-FIRST1", "CTR-MIDDLE", "CTR-LAST01"] {
        return Err(format!("order changed after replace: {:?}", ids));
    }
    if all[0].status != ContractStatus::Revoked {
        return Err(format!("expected REVOKED, got {}", all[0].status));
    }
    Ok(())
}

async fn replace_missing_contract_returns_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s
        .replace_contract(make_contract("CTR-GHOST1", ContractStatus::Sent, "t1"))
        .await
    {
        Err(StorageError::NotFound { .. }) => {}
        other => return Err(format!("expected NotFound, got {:?}", other)),
    }
    let all = s.list_contracts().await.map_err(|e| e.to_string())?;
    if !all.is_empty() {
        return Err(format!("replace must not insert, found {:?}", all));
    }
    Ok(())
}

async fn replace_overwrites_blueprint<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_blueprint(make_blueprint("BP-REPL1", "Before"))
        .await
        .map_err(|e| e.to_string())?;
    s.replace_blueprint(make_blueprint("BP-REPL1", "After"))
        .await
        .map_err(|e| e.to_string())?;

    let got = s
        .get_blueprint("BP-REPL1")
        .await
        .map_err(|e| e.to_string())?
        .ok_or("blueprint missing after replace")?;
    if got.name != "After" {
        return Err(format!("expected name 'After', got '{}'", got.name));
    }
    Ok(())
}

async fn replace_missing_blueprint_returns_not_found<S, F, Fut>(
    factory: &F,
) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s.replace_blueprint(make_blueprint("BP-GHOST", "Ghost")).await {
        Err(StorageError::NotFound { .. }) => Ok(()),
        other => Err(format!("expected NotFound, got {:?}", other)),
    }
}
