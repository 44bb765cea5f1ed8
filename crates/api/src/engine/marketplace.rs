//! Marketplace purchases.

use baba_core::catalog::validate_purchase_ownership;
use baba_core::error::CoreError;
use baba_core::spoons::{purchase_key, SpoonAction};
use baba_core::types::DbId;
use baba_db::models::goodie::Goodie;
use baba_db::models::inventory::InventoryItem;
use baba_db::repositories::{GoodieRepo, InventoryRepo, SpoonRepo};
use baba_db::DbPool;
use baba_events::EventBus;
use chrono::Utc;
use serde::Serialize;

use super::ledger::{self, Award};
use crate::error::AppResult;

/// Result of a successful purchase.
#[derive(Debug, Serialize)]
pub struct Purchase {
    pub item: InventoryItem,
    pub goodie: Goodie,
    pub balance: i64,
    pub transaction_id: DbId,
}

/// Buy one unit of a goodie.
///
/// In one transaction: the goodie must exist and be active, non-food
/// goodies may be owned only once, the cost is debited from the spoon
/// balance and one inventory unit is created. Any failure leaves balance,
/// ledger and inventory untouched.
pub async fn purchase(
    pool: &DbPool,
    events: &EventBus,
    user_id: DbId,
    goodie_id: DbId,
) -> AppResult<Purchase> {
    let mut tx = pool.begin().await?;

    let goodie = GoodieRepo::find_by_id(&mut *tx, goodie_id)
        .await?
        .filter(|g| g.is_active)
        .ok_or(CoreError::NotFound {
            entity: "goodie",
            id: goodie_id,
        })?;

    // Purchases by one user are serialized on their spoon account, so the
    // ownership count below sees every purchase committed before ours.
    SpoonRepo::lock_balance(&mut tx, user_id).await?;

    let owned = InventoryRepo::count_owned(&mut tx, user_id, goodie.id).await?;
    validate_purchase_ownership(goodie.category()?, &goodie.name, owned)?;

    let now = Utc::now();
    let details = format!("Bought {}", goodie.name);
    let award: Award = ledger::award_in_tx(
        &mut tx,
        user_id,
        SpoonAction::MarketplacePurchase,
        &purchase_key(goodie.id, now),
        Some(goodie.cost),
        Some(&details),
    )
    .await?;

    let item = InventoryRepo::insert(&mut tx, user_id, goodie.id, goodie.cost, now).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        goodie_id = goodie.id,
        cost = goodie.cost,
        balance = award.balance,
        "Goodie purchased"
    );

    super::publish_balance(events, user_id, &award);
    super::publish_inventory_changed(events, user_id);

    Ok(Purchase {
        item,
        goodie,
        balance: award.balance,
        transaction_id: award.transaction.id,
    })
}
