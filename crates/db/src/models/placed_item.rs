//! Placement board models.

use baba_core::catalog::ItemCategory;
use baba_core::error::CoreError;
use baba_core::rarity::Rarity;
use baba_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::stored;

/// A row from the `placed_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlacedItem {
    pub id: DbId,
    pub user_id: DbId,
    pub slot_id: String,
    pub goodie_id: DbId,
    pub placement_key: String,
    pub placed_at: Timestamp,
    pub max_visits: Option<i32>,
    pub remaining_visits: Option<i32>,
}

/// A placement joined with the visual/identity fields of its goodie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlacedItemDetail {
    pub id: DbId,
    pub slot_id: String,
    pub goodie_id: DbId,
    pub placement_key: String,
    pub placed_at: Timestamp,
    pub max_visits: Option<i32>,
    pub remaining_visits: Option<i32>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub rarity: String,
}

impl PlacedItemDetail {
    pub fn category(&self) -> Result<ItemCategory, CoreError> {
        stored("placed item", self.id, ItemCategory::parse(&self.category))
    }
}

/// A food placement that can still attract cats.
#[derive(Debug, Clone, FromRow)]
pub struct ActiveFood {
    pub id: DbId,
    pub user_id: DbId,
    pub goodie_id: DbId,
    pub rarity: String,
    pub remaining_visits: i32,
}

impl ActiveFood {
    pub fn rarity(&self) -> Result<Rarity, CoreError> {
        stored("placed item", self.id, Rarity::parse(&self.rarity))
    }
}

/// Insert DTO for a placement.
#[derive(Debug, Clone)]
pub struct NewPlacedItem {
    pub user_id: DbId,
    pub slot_id: String,
    pub goodie_id: DbId,
    pub placement_key: String,
    pub placed_at: Timestamp,
    pub max_visits: Option<i32>,
}
