//! Spoon ledger models.

use baba_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `spoon_transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpoonTransaction {
    pub id: DbId,
    pub user_id: DbId,
    pub action_type: String,
    pub amount: i64,
    /// Caller-supplied idempotency key. Not enforced unique.
    pub target_id: String,
    pub details: String,
    pub created_at: Timestamp,
}

/// Insert DTO for a transaction.
#[derive(Debug, Clone)]
pub struct NewSpoonTransaction {
    pub user_id: DbId,
    pub action_type: String,
    pub amount: i64,
    pub target_id: String,
    pub details: String,
}
