//! Repository for the `placed_items` table (the yard placement board).

use baba_core::types::DbId;
use baba_core::yard::{slot_ids, SlotKind};
use sqlx::{PgExecutor, PgPool};

use super::PgTx;
use crate::models::placed_item::{ActiveFood, NewPlacedItem, PlacedItem, PlacedItemDetail};

const COLUMNS: &str =
    "id, user_id, slot_id, goodie_id, placement_key, placed_at, max_visits, remaining_visits";

const DETAIL_COLUMNS: &str = "p.id, p.slot_id, p.goodie_id, p.placement_key, p.placed_at, \
                              p.max_visits, p.remaining_visits, g.name, g.description, \
                              g.image_url, g.category, g.rarity";

/// Provides operations on yard placements.
pub struct YardRepo;

impl YardRepo {
    /// List the user's placements with goodie fields, ordered by slot.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PlacedItemDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM placed_items p \
             JOIN goodies g ON g.id = p.goodie_id \
             WHERE p.user_id = $1 \
             ORDER BY p.slot_id"
        );
        sqlx::query_as::<_, PlacedItemDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Lock the occupant of a slot for the remainder of the transaction.
    pub async fn find_in_slot_for_update(
        tx: &mut PgTx<'_>,
        user_id: DbId,
        slot_id: &str,
    ) -> Result<Option<PlacedItemDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM placed_items p \
             JOIN goodies g ON g.id = p.goodie_id \
             WHERE p.user_id = $1 AND p.slot_id = $2 \
             FOR UPDATE OF p"
        );
        sqlx::query_as::<_, PlacedItemDetail>(&query)
            .bind(user_id)
            .bind(slot_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a placement. Fails with `uq_placed_items_user_slot` if the
    /// slot is already occupied.
    pub async fn insert(tx: &mut PgTx<'_>, input: &NewPlacedItem) -> Result<PlacedItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO placed_items \
                (user_id, slot_id, goodie_id, placement_key, placed_at, max_visits, remaining_visits) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlacedItem>(&query)
            .bind(input.user_id)
            .bind(&input.slot_id)
            .bind(input.goodie_id)
            .bind(&input.placement_key)
            .bind(input.placed_at)
            .bind(input.max_visits)
            .fetch_one(&mut **tx)
            .await
    }

    /// Remove a placement. Returns `true` if a row was deleted.
    pub async fn delete(tx: &mut PgTx<'_>, placed_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM placed_items WHERE id = $1")
            .bind(placed_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Food placements with visits remaining, optionally for one user only.
    pub async fn list_active_food(
        pool: &PgPool,
        user_id: Option<DbId>,
    ) -> Result<Vec<ActiveFood>, sqlx::Error> {
        sqlx::query_as::<_, ActiveFood>(
            "SELECT p.id, p.user_id, p.goodie_id, g.rarity, p.remaining_visits \
             FROM placed_items p \
             JOIN goodies g ON g.id = p.goodie_id \
             WHERE p.remaining_visits > 0 \
               AND ($1::BIGINT IS NULL OR p.user_id = $1) \
             ORDER BY p.user_id, p.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// `(slot_id, goodie_id)` for every toy placement the user has.
    pub async fn toys_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<Vec<(String, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (String, DbId)>(
            "SELECT slot_id, goodie_id FROM placed_items \
             WHERE user_id = $1 AND slot_id = ANY($2) \
             ORDER BY slot_id",
        )
        .bind(user_id)
        .bind(slot_ids(SlotKind::Toy))
        .fetch_all(executor)
        .await
    }

    /// Take one visit from a food placement.
    ///
    /// The decrement only applies while visits remain, so concurrent passes
    /// cannot drive the counter below zero. Returns the new remaining count,
    /// or `None` if the placement is gone or already exhausted.
    pub async fn take_visit(tx: &mut PgTx<'_>, placed_id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE placed_items \
             SET remaining_visits = remaining_visits - 1 \
             WHERE id = $1 AND remaining_visits > 0 \
             RETURNING remaining_visits",
        )
        .bind(placed_id)
        .fetch_optional(&mut **tx)
        .await
    }
}
