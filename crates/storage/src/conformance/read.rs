use std::future::Future;

use contractflow_model::{ContractStatus, FieldValue};

use super::{make_blueprint, make_contract, TestResult};
use crate::ContractStore;

pub(super) async fn run_read_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "read",
        "empty_store_lists_nothing",
        empty_store_lists_nothing(factory).await,
    ));
    results.push(TestResult::from_result(
        "read",
        "get_missing_returns_none",
        get_missing_returns_none(factory).await,
    ));
    results.push(TestResult::from_result(
        "read",
        "list_preserves_insertion_order",
        list_preserves_insertion_order(factory).await,
    ));
    results.push(TestResult::from_result(
        "read",
        "repeated_get_is_idempotent",
        repeated_get_is_idempotent(factory).await,
    ));
    results.push(TestResult::from_result(
        "read",
        "field_value_types_round_trip",
        field_value_types_round_trip(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

async fn empty_store_lists_nothing<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let blueprints = s.list_blueprints().await.map_err(|e| e.to_string())?;
    let contracts = s.list_contracts().await.map_err(|e| e.to_string())?;
    if !blueprints.is_empty() || !contracts.is_empty() {
        return Err(format!(
            "expected empty collections, got {} blueprints and {} contracts",
            blueprints.len(),
            contracts.len()
        ));
    }
    Ok(())
}

/// Absent ids read as `None`, not as an error.
async fn get_missing_returns_none<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let bp = s.get_blueprint("BP-NOPE0").await.map_err(|e| e.to_string())?;
    let c = s.get_contract("CTR-NOPE00").await.map_err(|e| e.to_string())?;
    if bp.is_some() || c.is_some() {
        return Err(format!("expected None for both, got {:?} and {:?}", bp, c));
    }
    Ok(())
}

/// `list_*` returns records in the order they were appended, not sorted.
async fn list_preserves_insertion_order<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    for id in ["CTR-CCCCCC", "CTR-AAAAAA", "CTR-BBBBBB"] {
        s.append_contract(make_contract(id, ContractStatus::Created, "t0"))
            .await
            .map_err(|e| e.to_string())?;
    }
    for id in ["BP-ZZZZZ", "BP-MMMMM"] {
        s.append_blueprint(make_blueprint(id, id))
            .await
            .map_err(|e| e.to_string())?;
    }

    let contract_ids: Vec<String> = s
        .list_contracts()
        .await
        .map_err(|e| e.to_string())?
        .into_iter()
        .map(|c| c.id)
        .collect();
    if contract_ids != ["CTR-CCCCCC", "CTR-AAAAAA", "CTR-BBBBBB"] {
        return Err(format!("unexpected contract order: {:?}", contract_ids));
    }

    let blueprint_ids: Vec<String> = s
        .list_blueprints()
        .await
        .map_err(|e| e.to_string())?
        .into_iter()
        .map(|b| b.id)
        .collect();
    if blueprint_ids != ["BP-ZZZZZ", "BP-MMMMM"] {
        return Err(format!("unexpected blueprint order: {:?}", blueprint_ids));
    }
    Ok(())
}

/// Two reads with no intervening mutation return equal records.
async fn repeated_get_is_idempotent<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_contract(make_contract("CTR-IDEM01", ContractStatus::Approved, "t0"))
        .await
        .map_err(|e| e.to_string())?;

    let first = s.get_contract("CTR-IDEM01").await.map_err(|e| e.to_string())?;
    let second = s.get_contract("CTR-IDEM01").await.map_err(|e| e.to_string())?;
    if first != second || first.is_none() {
        return Err(format!("reads differ: {:?} vs {:?}", first, second));
    }
    Ok(())
}

/// Boolean values stay boolean and string values stay string.
async fn field_value_types_round_trip<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let mut c = make_contract("CTR-VALS01", ContractStatus::Sent, "t0");
    c.field_values
        .insert("FLD-TEXT0001".to_string(), FieldValue::from("true"));
    c.field_values
        .insert("FLD-CHECK001".to_string(), FieldValue::Flag(true));
    c.field_values
        .insert("not-in-blueprint".to_string(), FieldValue::from(""));
    s.append_contract(c.clone())
        .await
        .map_err(|e| e.to_string())?;

    let got = s
        .get_contract("CTR-VALS01")
        .await
        .map_err(|e| e.to_string())?
        .ok_or("contract missing after append")?;
    if got.field_value("FLD-TEXT0001") != Some(&FieldValue::Text("true".to_string())) {
        return Err(format!(
            "text value changed kind: {:?}",
            got.field_value("FLD-TEXT0001")
        ));
    }
    if got.field_value("FLD-CHECK001") != Some(&FieldValue::Flag(true)) {
        return Err(format!(
            "checkbox value changed kind: {:?}",
            got.field_value("FLD-CHECK001")
        ));
    }
    if got != c {
        return Err(format!("expected {:?}, got {:?}", c, got));
    }
    Ok(())
}
