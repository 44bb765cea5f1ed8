//! Handlers for the placement board and on-demand visit checks.

use axum::extract::{Path, State};
use axum::Json;
use baba_core::types::DbId;
use baba_core::visits::visit_probability;
use baba_core::yard::{occupied_toy_slots, SlotKind, YARD_SLOTS};
use baba_db::models::placed_item::PlacedItemDetail;
use baba_db::repositories::YardRepo;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::engine::placement::{self, Placement, Removed};
use crate::engine::visits::{self, PassSummary};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PlaceItemRequest {
    pub inventory_item_id: DbId,
    /// Must be `true` to place onto an occupied slot.
    #[serde(default)]
    pub replace: bool,
}

#[derive(Debug, Serialize)]
pub struct SlotView {
    pub id: &'static str,
    pub kind: SlotKind,
    pub x: i32,
    pub y: i32,
    pub occupant: Option<PlacedItemDetail>,
}

#[derive(Debug, Serialize)]
pub struct YardView {
    pub slots: Vec<SlotView>,
    /// Distinct occupied toy slots.
    pub toy_count: usize,
    /// Chance that the food attracts a cat on the next check.
    pub visit_probability: f64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/yard
///
/// Every slot with its occupant. Also the polling fallback clients use to
/// resynchronise after missing pushed events.
pub async fn get_yard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<YardView>>> {
    let mut placed = YardRepo::list_for_user(&state.pool, auth.user_id).await?;

    let toy_count = occupied_toy_slots(placed.iter().map(|p| p.slot_id.as_str()));

    let slots = YARD_SLOTS
        .iter()
        .map(|slot| {
            let occupant = placed
                .iter()
                .position(|p| p.slot_id == slot.id)
                .map(|idx| placed.swap_remove(idx));
            SlotView {
                id: slot.id,
                kind: slot.kind,
                x: slot.x,
                y: slot.y,
                occupant,
            }
        })
        .collect();

    Ok(Json(DataResponse {
        data: YardView {
            slots,
            toy_count,
            visit_probability: visit_probability(toy_count),
        },
    }))
}

/// POST /api/v1/yard/slots/{slot_id}
pub async fn place_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slot_id): Path<String>,
    Json(input): Json<PlaceItemRequest>,
) -> AppResult<Json<DataResponse<Placement>>> {
    let placement = placement::place_item(
        &state.pool,
        &state.event_bus,
        auth.user_id,
        &slot_id,
        input.inventory_item_id,
        input.replace,
    )
    .await?;
    Ok(Json(DataResponse { data: placement }))
}

/// DELETE /api/v1/yard/slots/{slot_id}
///
/// Toys return to the inventory; food is discarded.
pub async fn return_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slot_id): Path<String>,
) -> AppResult<Json<DataResponse<Removed>>> {
    let removed =
        placement::return_item(&state.pool, &state.event_bus, auth.user_id, &slot_id).await?;
    Ok(Json(DataResponse { data: removed }))
}

/// POST /api/v1/yard/check-visits
///
/// Run one visit pass over the caller's yard only.
pub async fn check_visits(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PassSummary>>> {
    let mut rng = StdRng::from_os_rng();
    let summary =
        visits::run_pass(&state.pool, &state.event_bus, Some(auth.user_id), &mut rng).await?;
    Ok(Json(DataResponse { data: summary }))
}
