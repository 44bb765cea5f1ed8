//! Inventory store models.

use baba_core::catalog::ItemCategory;
use baba_core::error::CoreError;
use baba_core::rarity::Rarity;
use baba_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::stored;

/// A row from the `inventory_items` table: one owned unit of a goodie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryItem {
    pub id: DbId,
    pub user_id: DbId,
    pub goodie_id: DbId,
    pub cost: i64,
    pub acquired_at: Timestamp,
}

/// An inventory unit joined with its catalog entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryEntry {
    pub id: DbId,
    pub goodie_id: DbId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub rarity: String,
    pub cost: i64,
    pub acquired_at: Timestamp,
}

impl InventoryEntry {
    pub fn category(&self) -> Result<ItemCategory, CoreError> {
        stored("inventory item", self.id, ItemCategory::parse(&self.category))
    }

    pub fn rarity(&self) -> Result<Rarity, CoreError> {
        stored("inventory item", self.id, Rarity::parse(&self.rarity))
    }
}

/// Units owned per goodie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventorySummary {
    pub goodie_id: DbId,
    pub name: String,
    pub category: String,
    pub rarity: String,
    pub quantity: i64,
}
