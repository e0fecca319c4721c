use std::future::Future;

use contractflow_model::ContractStatus;

use super::{make_contract, TestResult};
use crate::{ContractStore, StorageError};

pub(super) async fn run_version_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "version",
        "cas_replace_with_current_stamp_succeeds",
        cas_replace_with_current_stamp_succeeds(factory).await,
    ));
    results.push(TestResult::from_result(
        "version",
        "cas_replace_with_stale_stamp_conflicts",
        cas_replace_with_stale_stamp_conflicts(factory).await,
    ));
    results.push(TestResult::from_result(
        "version",
        "second_writer_from_same_base_loses",
        second_writer_from_same_base_loses(factory).await,
    ));
    results.push(TestResult::from_result(
        "version",
        "cas_replace_missing_returns_not_found",
        cas_replace_missing_returns_not_found(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

async fn cas_replace_with_current_stamp_succeeds<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_contract(make_contract("CTR-CAS001", ContractStatus::Created, "t0"))
        .await
        .map_err(|e| e.to_string())?;
    s.replace_contract_if_unchanged(
        make_contract("CTR-CAS001", ContractStatus::Approved, "t1"),
        "t0",
    )
    .await
    .map_err(|e| e.to_string())?;

    let got = s
        .get_contract("CTR-CAS001")
        .await
        .map_err(|e| e.to_string())?
        .ok_or("contract missing after replace")?;
    if got.status != ContractStatus::Approved || got.updated_at != "t1" {
        return Err(format!("expected APPROVED at t1, got {:?}", got));
    }
    Ok(())
}

/// A stale stamp is refused with the stored stamp reported, and the stored
/// record is left as it was.
async fn cas_replace_with_stale_stamp_conflicts<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_contract(make_contract("CTR-CAS002", ContractStatus::Sent, "t5"))
        .await
        .map_err(|e| e.to_string())?;

    match s
        .replace_contract_if_unchanged(
            make_contract("CTR-CAS002", ContractStatus::Signed, "t6"),
            "t4",
        )
        .await
    {
        Err(StorageError::ConcurrentConflict {
            id,
            expected_updated_at,
            actual_updated_at,
        }) => {
            if id != "CTR-CAS002" || expected_updated_at != "t4" || actual_updated_at != "t5" {
                return Err(format!(
                    "conflict fields wrong: id={} expected={} actual={}",
                    id, expected_updated_at, actual_updated_at
                ));
            }
        }
        other => return Err(format!("expected ConcurrentConflict, got {:?}", other)),
    }

    let got = s
        .get_contract("CTR-CAS002")
        .await
        .map_err(|e| e.to_string())?
        .ok_or("contract missing")?;
    if got.status != ContractStatus::Sent {
        return Err(format!("stored record changed on conflict: {:?}", got));
    }
    Ok(())
}

/// Two working copies read at the same stamp: the first commit wins, the
/// second gets a conflict instead of silently overwriting.
async fn second_writer_from_same_base_loses<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.append_contract(make_contract("CTR-RACE01", ContractStatus::Sent, "t0"))
        .await
        .map_err(|e| e.to_string())?;

    s.replace_contract_if_unchanged(
        make_contract("CTR-RACE01", ContractStatus::Signed, "t1"),
        "t0",
    )
    .await
    .map_err(|e| e.to_string())?;

    match s
        .replace_contract_if_unchanged(
            make_contract("CTR-RACE01", ContractStatus::Revoked, "t2"),
            "t0",
        )
        .await
    {
        Err(StorageError::ConcurrentConflict { .. }) => {}
        other => return Err(format!("expected ConcurrentConflict, got {:?}", other)),
    }

    let got = s
        .get_contract("CTR-RACE01")
        .await
        .map_err(|e| e.to_string())?
        .ok_or("contract missing")?;
    if got.status != ContractStatus::Signed {
        return Err(format!("expected first writer's SIGNED, got {}", got.status));
    }
    Ok(())
}

async fn cas_replace_missing_returns_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s
        .replace_contract_if_unchanged(
            make_contract("CTR-GHOST2", ContractStatus::Approved, "t1"),
            "t0",
        )
        .await
    {
        Err(StorageError::NotFound { .. }) => Ok(()),
        other => Err(format!("expected NotFound, got {:?}", other)),
    }
}
