//! Repository for the `goodies` catalog.

use baba_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::goodie::Goodie;

const COLUMNS: &str =
    "id, name, description, image_url, category, rarity, cost, is_active, created_at";

/// Read access to the marketplace catalog.
pub struct GoodieRepo;

impl GoodieRepo {
    /// List purchasable goodies, cheapest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Goodie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM goodies WHERE is_active = true ORDER BY cost, name"
        );
        sqlx::query_as::<_, Goodie>(&query).fetch_all(pool).await
    }

    /// Find a goodie by ID, including inactive ones.
    ///
    /// Inactive goodies are still the canonical definition for items users
    /// already own.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Goodie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goodies WHERE id = $1");
        sqlx::query_as::<_, Goodie>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
