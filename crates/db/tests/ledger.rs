//! Integration tests for the spoon ledger primitives.
//!
//! The engine composes these inside one transaction; here they are
//! exercised directly to pin down the storage behaviour:
//! - Accounts are created lazily at zero
//! - The balance column cannot go negative
//! - Duplicate idempotency keys are stored twice
//! - The ledger total tracks the appended amounts

use baba_db::models::spoon::NewSpoonTransaction;
use baba_db::repositories::{SpoonRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, uid: &str) -> i64 {
    UserRepo::find_or_create(pool, uid, None).await.unwrap().id
}

fn credit(user_id: i64, amount: i64, target_id: &str) -> NewSpoonTransaction {
    NewSpoonTransaction {
        user_id,
        action_type: "recipe_save".to_string(),
        amount,
        target_id: target_id.to_string(),
        details: "Saved a recipe".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_balance_defaults_to_zero(pool: PgPool) {
    let user = new_user(&pool, "uid-zero").await;
    assert_eq!(SpoonRepo::balance(&pool, user).await.unwrap(), 0);

    let mut tx = pool.begin().await.unwrap();
    assert_eq!(SpoonRepo::lock_balance(&mut tx, user).await.unwrap(), 0);
    tx.commit().await.unwrap();

    assert_eq!(SpoonRepo::balance(&pool, user).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_balance_and_append(pool: PgPool) {
    let user = new_user(&pool, "uid-append").await;

    let mut tx = pool.begin().await.unwrap();
    SpoonRepo::lock_balance(&mut tx, user).await.unwrap();
    SpoonRepo::set_balance(&mut tx, user, 10).await.unwrap();
    let txn = SpoonRepo::append(&mut tx, &credit(user, 10, "recipe-1"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(txn.amount, 10);
    assert_eq!(txn.target_id, "recipe-1");
    assert_eq!(SpoonRepo::balance(&pool, user).await.unwrap(), 10);
    assert_eq!(SpoonRepo::ledger_total(&pool, user).await.unwrap(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_balance_rejected_by_schema(pool: PgPool) {
    let user = new_user(&pool, "uid-negative").await;

    let mut tx = pool.begin().await.unwrap();
    SpoonRepo::lock_balance(&mut tx, user).await.unwrap();
    let result = SpoonRepo::set_balance(&mut tx, user, -1).await;
    assert!(result.is_err(), "balance CHECK should reject negatives");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_target_ids_are_both_stored(pool: PgPool) {
    let user = new_user(&pool, "uid-dupe").await;

    let mut tx = pool.begin().await.unwrap();
    SpoonRepo::append(&mut tx, &credit(user, 10, "recipe-7")).await.unwrap();
    SpoonRepo::append(&mut tx, &credit(user, 10, "recipe-7")).await.unwrap();
    tx.commit().await.unwrap();

    let listed = SpoonRepo::list_transactions(&pool, user, 100, 0).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|t| t.target_id == "recipe-7"));
    assert_eq!(SpoonRepo::count_transactions(&pool, user).await.unwrap(), 2);
    assert_eq!(SpoonRepo::ledger_total(&pool, user).await.unwrap(), 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transactions_are_paginated(pool: PgPool) {
    let user = new_user(&pool, "uid-page").await;

    let mut tx = pool.begin().await.unwrap();
    for n in 0..5 {
        SpoonRepo::append(&mut tx, &credit(user, 2, &format!("daily-{n}")))
            .await
            .unwrap();
    }
    tx.commit().await.unwrap();

    let first = SpoonRepo::list_transactions(&pool, user, 2, 0).await.unwrap();
    let rest = SpoonRepo::list_transactions(&pool, user, 10, 2).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(rest.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rolled_back_transaction_leaves_nothing(pool: PgPool) {
    let user = new_user(&pool, "uid-rollback").await;

    {
        let mut tx = pool.begin().await.unwrap();
        SpoonRepo::lock_balance(&mut tx, user).await.unwrap();
        SpoonRepo::set_balance(&mut tx, user, 50).await.unwrap();
        SpoonRepo::append(&mut tx, &credit(user, 50, "x")).await.unwrap();
        tx.rollback().await.unwrap();
    }

    assert_eq!(SpoonRepo::balance(&pool, user).await.unwrap(), 0);
    assert_eq!(SpoonRepo::count_transactions(&pool, user).await.unwrap(), 0);
}
