//! Marketplace catalog model.

use baba_core::catalog::ItemCategory;
use baba_core::error::CoreError;
use baba_core::rarity::Rarity;
use baba_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::stored;

/// A row from the `goodies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goodie {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub rarity: String,
    pub cost: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Goodie {
    pub fn category(&self) -> Result<ItemCategory, CoreError> {
        stored("goodie", self.id, ItemCategory::parse(&self.category))
    }

    pub fn rarity(&self) -> Result<Rarity, CoreError> {
        stored("goodie", self.id, Rarity::parse(&self.rarity))
    }
}
