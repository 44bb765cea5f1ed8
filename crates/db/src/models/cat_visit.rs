//! Visit history models.

use baba_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cat_visits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatVisit {
    pub id: DbId,
    pub user_id: DbId,
    pub cat_id: DbId,
    pub food_goodie_id: DbId,
    pub toy_goodie_ids: Vec<DbId>,
    pub reward: i64,
    pub is_read: bool,
    pub visited_at: Timestamp,
}

/// A visit joined with the visiting cat's catalog fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatVisitEntry {
    pub id: DbId,
    pub cat_id: DbId,
    pub cat_name: String,
    pub cat_image_url: String,
    pub cat_rarity: String,
    pub food_goodie_id: DbId,
    pub toy_goodie_ids: Vec<DbId>,
    pub reward: i64,
    pub is_read: bool,
    pub visited_at: Timestamp,
}

/// Insert DTO for a visit. New visits are always unread.
#[derive(Debug, Clone)]
pub struct NewCatVisit {
    pub user_id: DbId,
    pub cat_id: DbId,
    pub food_goodie_id: DbId,
    pub toy_goodie_ids: Vec<DbId>,
    pub reward: i64,
}
