//! Spoon ledger operations.
//!
//! Every award locks the account row, checks the new balance, updates it and
//! appends exactly one transaction, all inside the caller's transaction. A
//! rejected spend writes nothing.

use baba_core::spoons::{self, Reconciliation, SpoonAction};
use baba_core::types::DbId;
use baba_db::models::spoon::{NewSpoonTransaction, SpoonTransaction};
use baba_db::repositories::{PgTx, SpoonRepo};
use baba_db::DbPool;
use baba_events::EventBus;
use serde::Serialize;

use crate::error::AppResult;

/// A committed (or about-to-commit) ledger entry and the resulting balance.
#[derive(Debug, Clone, Serialize)]
pub struct Award {
    pub transaction: SpoonTransaction,
    pub balance: i64,
}

/// Apply an action to the user's balance inside an open transaction.
///
/// `amount` is only consulted for actions without a fixed value
/// (`cat_visit`, `marketplace_purchase`). `details` defaults to the action's
/// description.
pub async fn award_in_tx(
    tx: &mut PgTx<'_>,
    user_id: DbId,
    action: SpoonAction,
    target_id: &str,
    amount: Option<i64>,
    details: Option<&str>,
) -> AppResult<Award> {
    let amount = spoons::resolve_amount(action, amount)?;

    let balance = SpoonRepo::lock_balance(tx, user_id).await?;
    let balance = spoons::apply(balance, amount)?;
    SpoonRepo::set_balance(tx, user_id, balance).await?;

    let transaction = SpoonRepo::append(
        tx,
        &NewSpoonTransaction {
            user_id,
            action_type: action.as_str().to_string(),
            amount,
            target_id: target_id.to_string(),
            details: details.unwrap_or_else(|| action.describe()).to_string(),
        },
    )
    .await?;

    tracing::debug!(user_id, action = %action, amount, balance, target_id, "Spoon ledger updated");

    Ok(Award {
        transaction,
        balance,
    })
}

/// Award a fixed-amount earning action on behalf of a client.
///
/// Repeating a `target_id` records a second transaction; keys are not
/// deduplicated.
pub async fn award(
    pool: &DbPool,
    events: &EventBus,
    user_id: DbId,
    action: SpoonAction,
    target_id: &str,
    details: Option<&str>,
) -> AppResult<Award> {
    spoons::validate_client_award(action)?;

    let mut tx = pool.begin().await?;
    let award = award_in_tx(&mut tx, user_id, action, target_id, None, details).await?;
    tx.commit().await?;

    super::publish_balance(events, user_id, &award);
    Ok(award)
}

/// Compare the stored balance against the sum of the transaction log.
pub async fn reconcile(pool: &DbPool, user_id: DbId) -> AppResult<Reconciliation> {
    let balance = SpoonRepo::balance(pool, user_id).await?;
    let ledger_total = SpoonRepo::ledger_total(pool, user_id).await?;

    let reconciliation = spoons::reconcile(balance, ledger_total);
    if !reconciliation.consistent {
        tracing::warn!(user_id, balance, ledger_total, "Spoon balance drifted from ledger");
    }
    Ok(reconciliation)
}
