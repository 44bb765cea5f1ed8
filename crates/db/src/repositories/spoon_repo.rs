//! Repository for `spoon_accounts` and `spoon_transactions`.
//!
//! The repository only exposes the primitive steps. Pairing a balance
//! change with its transaction row, and rejecting overspends, happens in
//! the caller's transaction after locking the account with
//! [`SpoonRepo::lock_balance`].

use baba_core::types::DbId;
use sqlx::PgPool;

use super::PgTx;
use crate::models::spoon::{NewSpoonTransaction, SpoonTransaction};

const TX_COLUMNS: &str = "id, user_id, action_type, amount, target_id, details, created_at";

/// Provides balance and transaction-log operations.
pub struct SpoonRepo;

impl SpoonRepo {
    /// Current balance, or 0 for users without an account row yet.
    pub async fn balance(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let balance: Option<i64> =
            sqlx::query_scalar("SELECT balance FROM spoon_accounts WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(balance.unwrap_or(0))
    }

    /// Create the account if needed and lock it, returning the balance.
    pub async fn lock_balance(tx: &mut PgTx<'_>, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query(
            "INSERT INTO spoon_accounts (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query_scalar("SELECT balance FROM spoon_accounts WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Overwrite the balance of a locked account.
    pub async fn set_balance(
        tx: &mut PgTx<'_>,
        user_id: DbId,
        balance: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE spoon_accounts SET balance = $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(balance)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Append a transaction row.
    pub async fn append(
        tx: &mut PgTx<'_>,
        input: &NewSpoonTransaction,
    ) -> Result<SpoonTransaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO spoon_transactions (user_id, action_type, amount, target_id, details) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {TX_COLUMNS}"
        );
        sqlx::query_as::<_, SpoonTransaction>(&query)
            .bind(input.user_id)
            .bind(&input.action_type)
            .bind(input.amount)
            .bind(&input.target_id)
            .bind(&input.details)
            .fetch_one(&mut **tx)
            .await
    }

    /// List a user's transactions, newest first.
    pub async fn list_transactions(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SpoonTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {TX_COLUMNS} FROM spoon_transactions \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SpoonTransaction>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of transactions recorded for a user.
    pub async fn count_transactions(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM spoon_transactions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Sum of all transaction amounts for a user.
    pub async fn ledger_total(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM spoon_transactions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
