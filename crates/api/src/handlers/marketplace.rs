use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use baba_core::types::DbId;
use serde::Deserialize;

use crate::engine::marketplace::{self, Purchase};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub goodie_id: DbId,
}

/// POST /api/v1/marketplace/purchase
///
/// Debit the goodie's cost and add one unit to the caller's inventory.
/// Returns 422 `INSUFFICIENT_SPOONS` when the balance is too low.
pub async fn purchase(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<PurchaseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Purchase>>)> {
    let purchase =
        marketplace::purchase(&state.pool, &state.event_bus, auth.user_id, input.goodie_id)
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: purchase })))
}
