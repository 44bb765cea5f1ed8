//! Repository for the `cat_visits` table (visit history).

use baba_core::types::DbId;
use sqlx::PgPool;

use super::PgTx;
use crate::models::cat_visit::{CatVisit, CatVisitEntry, NewCatVisit};

const COLUMNS: &str =
    "id, user_id, cat_id, food_goodie_id, toy_goodie_ids, reward, is_read, visited_at";

/// Provides append, listing, and read-flag operations for visit history.
pub struct CatVisitRepo;

impl CatVisitRepo {
    /// Append an unread visit.
    pub async fn create(tx: &mut PgTx<'_>, input: &NewCatVisit) -> Result<CatVisit, sqlx::Error> {
        let query = format!(
            "INSERT INTO cat_visits (user_id, cat_id, food_goodie_id, toy_goodie_ids, reward) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatVisit>(&query)
            .bind(input.user_id)
            .bind(input.cat_id)
            .bind(input.food_goodie_id)
            .bind(&input.toy_goodie_ids)
            .bind(input.reward)
            .fetch_one(&mut **tx)
            .await
    }

    /// List a user's visits, newest first.
    ///
    /// When `unread_only` is `true`, only visits with `is_read = false` are
    /// returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CatVisitEntry>, sqlx::Error> {
        let filter = if unread_only {
            "AND v.is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT v.id, v.cat_id, c.name AS cat_name, c.image_url AS cat_image_url, \
                    c.rarity AS cat_rarity, v.food_goodie_id, v.toy_goodie_ids, v.reward, \
                    v.is_read, v.visited_at \
             FROM cat_visits v \
             JOIN cats c ON c.id = v.cat_id \
             WHERE v.user_id = $1 {filter} \
             ORDER BY v.visited_at DESC, v.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CatVisitEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of visits a user has received.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cat_visits WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Get the number of unread visits for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM cat_visits WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Mark every unread visit as read in a single statement.
    ///
    /// Returns the number of visits that were marked read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cat_visits SET is_read = true WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
