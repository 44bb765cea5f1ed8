//! Repository for the `inventory_items` table.

use baba_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use super::PgTx;
use crate::models::inventory::{InventoryEntry, InventoryItem, InventorySummary};

const COLUMNS: &str = "id, user_id, goodie_id, cost, acquired_at";

/// Joined column list for inventory listings.
const ENTRY_COLUMNS: &str = "i.id, i.goodie_id, g.name, g.description, g.image_url, \
                             g.category, g.rarity, i.cost, i.acquired_at";

/// Provides operations on a user's owned goodie units.
pub struct InventoryRepo;

impl InventoryRepo {
    /// List the user's units with catalog fields, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<InventoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM inventory_items i \
             JOIN goodies g ON g.id = i.goodie_id \
             WHERE i.user_id = $1 \
             ORDER BY i.acquired_at DESC, i.id DESC"
        );
        sqlx::query_as::<_, InventoryEntry>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count units per goodie for the user.
    pub async fn summary_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<InventorySummary>, sqlx::Error> {
        sqlx::query_as::<_, InventorySummary>(
            "SELECT g.id AS goodie_id, g.name, g.category, g.rarity, COUNT(*) AS quantity \
             FROM inventory_items i \
             JOIN goodies g ON g.id = i.goodie_id \
             WHERE i.user_id = $1 \
             GROUP BY g.id, g.name, g.category, g.rarity \
             ORDER BY g.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Total number of units the user holds.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Lock one of the user's units for the remainder of the transaction.
    ///
    /// Returns `None` if the unit does not exist or belongs to someone else.
    pub async fn find_for_update(
        tx: &mut PgTx<'_>,
        user_id: DbId,
        item_id: DbId,
    ) -> Result<Option<InventoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM inventory_items i \
             JOIN goodies g ON g.id = i.goodie_id \
             WHERE i.id = $1 AND i.user_id = $2 \
             FOR UPDATE OF i"
        );
        sqlx::query_as::<_, InventoryEntry>(&query)
            .bind(item_id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Units of a goodie the user owns, counting inventory and the yard.
    pub async fn count_owned(
        tx: &mut PgTx<'_>,
        user_id: DbId,
        goodie_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT \
                (SELECT COUNT(*) FROM inventory_items WHERE user_id = $1 AND goodie_id = $2) + \
                (SELECT COUNT(*) FROM placed_items WHERE user_id = $1 AND goodie_id = $2)",
        )
        .bind(user_id)
        .bind(goodie_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Add one unit to the user's inventory.
    pub async fn insert(
        tx: &mut PgTx<'_>,
        user_id: DbId,
        goodie_id: DbId,
        cost: i64,
        acquired_at: Timestamp,
    ) -> Result<InventoryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO inventory_items (user_id, goodie_id, cost, acquired_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(user_id)
            .bind(goodie_id)
            .bind(cost)
            .bind(acquired_at)
            .fetch_one(&mut **tx)
            .await
    }

    /// Remove exactly one unit. Returns `true` if a row was deleted.
    pub async fn delete(tx: &mut PgTx<'_>, item_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(item_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
