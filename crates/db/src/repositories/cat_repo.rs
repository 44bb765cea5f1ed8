//! Repository for the `cats` catalog.

use baba_core::types::DbId;
use sqlx::PgPool;

use crate::models::cat::Cat;

const COLUMNS: &str = "id, name, description, image_url, rarity, reward_multiplier, created_at";

/// Read access to the cat catalog.
pub struct CatRepo;

impl CatRepo {
    /// List every cat, ordered by rarity tier then name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Cat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cats \
             ORDER BY CASE rarity \
                WHEN 'common' THEN 0 WHEN 'uncommon' THEN 1 WHEN 'rare' THEN 2 \
                WHEN 'epic' THEN 3 ELSE 4 END, name"
        );
        sqlx::query_as::<_, Cat>(&query).fetch_all(pool).await
    }

    /// Find a cat by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats WHERE id = $1");
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
