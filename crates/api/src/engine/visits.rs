//! Visit simulator pass.
//!
//! One pass walks every food placement that still has visits left, rolls a
//! visit for each, and commits every successful visit in its own
//! transaction: decrement, remove when exhausted, record the visit, credit
//! the reward. A failing placement is logged and the pass moves on.

use std::collections::HashMap;

use baba_core::spoons::{cat_visit_key, SpoonAction};
use baba_core::types::DbId;
use baba_core::visits::{self, CatProfile, VisitRoll};
use baba_core::yard::occupied_toy_slots;
use baba_db::models::cat_visit::{CatVisit, NewCatVisit};
use baba_db::models::placed_item::ActiveFood;
use baba_db::repositories::{CatRepo, CatVisitRepo, YardRepo};
use baba_db::DbPool;
use baba_events::{event_types, DomainEvent, EventBus};
use rand::Rng;
use serde::Serialize;
use serde_json::json;

use super::ledger;
use crate::error::AppResult;

/// A committed visit.
#[derive(Debug, Clone, Serialize)]
pub struct VisitOutcome {
    pub visit: CatVisit,
    pub placed_item_id: DbId,
    pub remaining_visits: i32,
    /// The food ran out and was removed from the board.
    pub food_consumed: bool,
    pub balance: i64,
}

/// Summary of one simulator pass.
#[derive(Debug, Default, Serialize)]
pub struct PassSummary {
    /// Food placements rolled.
    pub checked: usize,
    pub visits: Vec<VisitOutcome>,
    /// Placements whose visit could not be recorded.
    pub failed: usize,
}

/// Toys on a user's board, as seen by one pass.
struct ToyBoard {
    count: usize,
    goodie_ids: Vec<DbId>,
}

/// Run one pass over active food placements.
///
/// With `user_id` set only that user's yard is checked; this backs the
/// client-triggered check. Otherwise every yard is checked.
pub async fn run_pass<R: Rng + ?Sized>(
    pool: &DbPool,
    events: &EventBus,
    user_id: Option<DbId>,
    rng: &mut R,
) -> AppResult<PassSummary> {
    let foods = YardRepo::list_active_food(pool, user_id).await?;
    let mut summary = PassSummary::default();
    if foods.is_empty() {
        return Ok(summary);
    }

    let cats = CatRepo::list(pool)
        .await?
        .iter()
        .map(|cat| cat.profile())
        .collect::<Result<Vec<CatProfile>, _>>()?;

    let mut boards: HashMap<DbId, ToyBoard> = HashMap::new();

    for food in &foods {
        summary.checked += 1;

        if !boards.contains_key(&food.user_id) {
            match toy_board(pool, food.user_id).await {
                Ok(board) => {
                    boards.insert(food.user_id, board);
                }
                Err(e) => {
                    tracing::error!(user_id = food.user_id, error = %e, "Failed to load toys");
                    summary.failed += 1;
                    continue;
                }
            }
        }
        let Some(board) = boards.get(&food.user_id) else {
            continue;
        };

        let rarity = match food.rarity() {
            Ok(rarity) => rarity,
            Err(e) => {
                tracing::error!(placed_item_id = food.id, error = %e, "Skipping food placement");
                summary.failed += 1;
                continue;
            }
        };

        let Some(roll) = visits::roll_visit(rarity, board.count, &cats, rng) else {
            continue;
        };

        match apply_visit(pool, events, food, &board.goodie_ids, &roll).await {
            Ok(Some(outcome)) => summary.visits.push(outcome),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(
                    user_id = food.user_id,
                    placed_item_id = food.id,
                    cat_id = roll.cat_id,
                    error = %e,
                    "Failed to record cat visit"
                );
                summary.failed += 1;
            }
        }
    }

    if !summary.visits.is_empty() || summary.failed > 0 {
        tracing::info!(
            checked = summary.checked,
            visits = summary.visits.len(),
            failed = summary.failed,
            "Visit pass complete"
        );
    }

    Ok(summary)
}

/// Commit one rolled visit against a food placement.
///
/// Returns `None` when the placement was removed or exhausted after it was
/// read, in which case nothing is written.
pub async fn apply_visit(
    pool: &DbPool,
    events: &EventBus,
    food: &ActiveFood,
    toy_goodie_ids: &[DbId],
    roll: &VisitRoll,
) -> AppResult<Option<VisitOutcome>> {
    let mut tx = pool.begin().await?;

    let Some(remaining_visits) = YardRepo::take_visit(&mut tx, food.id).await? else {
        return Ok(None);
    };

    let food_consumed = remaining_visits == 0;
    if food_consumed {
        YardRepo::delete(&mut tx, food.id).await?;
    }

    let visit = CatVisitRepo::create(
        &mut tx,
        &NewCatVisit {
            user_id: food.user_id,
            cat_id: roll.cat_id,
            food_goodie_id: food.goodie_id,
            toy_goodie_ids: toy_goodie_ids.to_vec(),
            reward: roll.reward,
        },
    )
    .await?;

    let award = ledger::award_in_tx(
        &mut tx,
        food.user_id,
        SpoonAction::CatVisit,
        &cat_visit_key(visit.id),
        Some(roll.reward),
        None,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id = food.user_id,
        cat_id = roll.cat_id,
        reward = roll.reward,
        remaining_visits,
        "Cat visited"
    );

    let outcome = VisitOutcome {
        visit,
        placed_item_id: food.id,
        remaining_visits,
        food_consumed,
        balance: award.balance,
    };
    publish_visit(events, &outcome, &award);

    Ok(Some(outcome))
}

async fn toy_board(pool: &DbPool, user_id: DbId) -> Result<ToyBoard, sqlx::Error> {
    let toys = YardRepo::toys_for_user(pool, user_id).await?;
    Ok(ToyBoard {
        count: occupied_toy_slots(toys.iter().map(|(slot, _)| slot.as_str())),
        goodie_ids: toys.into_iter().map(|(_, goodie_id)| goodie_id).collect(),
    })
}

fn publish_visit(events: &EventBus, outcome: &VisitOutcome, award: &ledger::Award) {
    let user_id = outcome.visit.user_id;

    events.publish(
        DomainEvent::new(event_types::CAT_VISITED, user_id).with_payload(json!({
            "visit_id": outcome.visit.id,
            "cat_id": outcome.visit.cat_id,
            "reward": outcome.visit.reward,
            "placed_item_id": outcome.placed_item_id,
            "remaining_visits": outcome.remaining_visits,
        })),
    );

    if outcome.food_consumed {
        events.publish(
            DomainEvent::new(event_types::FOOD_CONSUMED, user_id).with_payload(json!({
                "placed_item_id": outcome.placed_item_id,
                "goodie_id": outcome.visit.food_goodie_id,
            })),
        );
    }

    super::publish_balance(events, user_id, award);
}
