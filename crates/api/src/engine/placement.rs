//! Placement board operations: place, replace, return.

use baba_core::error::CoreError;
use baba_core::types::{DbId, Timestamp};
use baba_core::yard::{self, Removal};
use baba_db::models::inventory::InventoryItem;
use baba_db::models::placed_item::{NewPlacedItem, PlacedItem, PlacedItemDetail};
use baba_db::repositories::{GoodieRepo, InventoryRepo, PgTx, YardRepo};
use baba_db::DbPool;
use baba_events::EventBus;
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// What happened to an item that left the board.
#[derive(Debug, Serialize)]
pub struct Removed {
    pub placed_item_id: DbId,
    pub goodie_id: DbId,
    pub removal: Removal,
    /// The inventory unit recreated for a returned toy.
    pub inventory_item: Option<InventoryItem>,
}

/// Result of a placement.
#[derive(Debug, Serialize)]
pub struct Placement {
    pub placed: PlacedItem,
    /// The previous occupant, when the placement replaced one.
    pub displaced: Option<Removed>,
}

/// Move one inventory unit onto a slot.
///
/// Placing onto an occupied slot requires `replace`; the occupant is then
/// returned to the inventory (toys) or discarded (food). Food placements
/// start with the visit capacity of their rarity.
pub async fn place_item(
    pool: &DbPool,
    events: &EventBus,
    user_id: DbId,
    slot_id: &str,
    inventory_item_id: DbId,
    replace: bool,
) -> AppResult<Placement> {
    yard::find_slot(slot_id)?;

    let mut tx = pool.begin().await?;

    let entry = InventoryRepo::find_for_update(&mut tx, user_id, inventory_item_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "inventory item",
            id: inventory_item_id,
        })?;

    let occupant = YardRepo::find_in_slot_for_update(&mut tx, user_id, slot_id).await?;
    let occupant_category = occupant.as_ref().map(|o| o.category()).transpose()?;

    let plan = yard::plan_placement(
        slot_id,
        entry.category()?,
        entry.rarity()?,
        occupant_category,
        replace,
    )?;

    let now = Utc::now();
    let displaced = match (occupant, plan.displaced) {
        (Some(occupant), Some(removal)) => {
            Some(take_off_board(&mut tx, user_id, &occupant, removal, now).await?)
        }
        _ => None,
    };

    InventoryRepo::delete(&mut tx, entry.id).await?;

    let placed = YardRepo::insert(
        &mut tx,
        &NewPlacedItem {
            user_id,
            slot_id: plan.slot.id.to_string(),
            goodie_id: entry.goodie_id,
            placement_key: yard::placement_key(entry.goodie_id, now),
            placed_at: now,
            max_visits: plan.max_visits,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        slot_id,
        goodie_id = placed.goodie_id,
        max_visits = ?placed.max_visits,
        replaced = displaced.is_some(),
        "Item placed"
    );

    super::publish_yard_changed(events, user_id, slot_id);
    super::publish_inventory_changed(events, user_id);

    Ok(Placement { placed, displaced })
}

/// Take the occupant off a slot.
///
/// Toys go back to the inventory; food is discarded and never restored.
pub async fn return_item(
    pool: &DbPool,
    events: &EventBus,
    user_id: DbId,
    slot_id: &str,
) -> AppResult<Removed> {
    yard::find_slot(slot_id)?;

    let mut tx = pool.begin().await?;

    let occupant = YardRepo::find_in_slot_for_update(&mut tx, user_id, slot_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Slot '{slot_id}' is empty")))?;

    let removal = yard::removal_for(occupant.category()?);
    let removed = take_off_board(&mut tx, user_id, &occupant, removal, Utc::now()).await?;

    tx.commit().await?;

    tracing::info!(user_id, slot_id, removal = ?removed.removal, "Item removed from yard");

    super::publish_yard_changed(events, user_id, slot_id);
    if removed.inventory_item.is_some() {
        super::publish_inventory_changed(events, user_id);
    }

    Ok(removed)
}

/// Delete a placement and, for returned items, recreate the inventory unit
/// from the canonical catalog entry.
async fn take_off_board(
    tx: &mut PgTx<'_>,
    user_id: DbId,
    occupant: &PlacedItemDetail,
    removal: Removal,
    now: Timestamp,
) -> AppResult<Removed> {
    YardRepo::delete(tx, occupant.id).await?;

    let inventory_item = match removal {
        Removal::Discard => None,
        Removal::ReturnToInventory => {
            let goodie = GoodieRepo::find_by_id(&mut **tx, occupant.goodie_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "goodie",
                    id: occupant.goodie_id,
                })?;
            Some(InventoryRepo::insert(tx, user_id, goodie.id, goodie.cost, now).await?)
        }
    };

    Ok(Removed {
        placed_item_id: occupant.id,
        goodie_id: occupant.goodie_id,
        removal,
        inventory_item,
    })
}
