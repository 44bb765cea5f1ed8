//! Cat catalog model.

use baba_core::error::CoreError;
use baba_core::rarity::Rarity;
use baba_core::types::{DbId, Timestamp};
use baba_core::visits::CatProfile;
use serde::Serialize;
use sqlx::FromRow;

use super::stored;

/// A row from the `cats` table. Immutable reference data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cat {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub rarity: String,
    pub reward_multiplier: f64,
    pub created_at: Timestamp,
}

impl Cat {
    pub fn rarity(&self) -> Result<Rarity, CoreError> {
        stored("cat", self.id, Rarity::parse(&self.rarity))
    }

    /// The fields the visit simulator needs.
    pub fn profile(&self) -> Result<CatProfile, CoreError> {
        Ok(CatProfile {
            id: self.id,
            rarity: self.rarity()?,
            reward_multiplier: self.reward_multiplier,
        })
    }
}
