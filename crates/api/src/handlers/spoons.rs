//! Handlers for the spoon balance and ledger.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use baba_core::error::CoreError;
use baba_core::history::{clamp_limit, clamp_offset};
use baba_core::spoons::{Reconciliation, SpoonAction};
use baba_db::models::spoon::SpoonTransaction;
use baba_db::repositories::SpoonRepo;
use serde::Deserialize;

use crate::engine::ledger::{self, Award};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AwardRequest {
    /// Action name, e.g. `"recipe_save"`.
    pub action: String,
    /// Caller-supplied idempotency key, e.g. the saved recipe's id.
    pub target_id: String,
    pub details: Option<String>,
}

/// GET /api/v1/spoons
///
/// Current balance, checked against the sum of the transaction log.
pub async fn get_balance(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Reconciliation>>> {
    let reconciliation = ledger::reconcile(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: reconciliation,
    }))
}

/// GET /api/v1/spoons/transactions
pub async fn list_transactions(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<SpoonTransaction>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let items = SpoonRepo::list_transactions(&state.pool, auth.user_id, limit, offset).await?;
    let total = SpoonRepo::count_transactions(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: Page {
            items,
            total,
            limit,
            offset,
        },
    }))
}

/// POST /api/v1/spoons/award
///
/// Record a fixed-amount earning action. Visit rewards and purchases are
/// rejected here; the server applies those itself.
pub async fn award(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AwardRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Award>>)> {
    let action = SpoonAction::parse(&input.action)?;

    let target_id = input.target_id.trim();
    if target_id.is_empty() {
        return Err(CoreError::Validation("target_id must not be empty".into()).into());
    }

    let award = ledger::award(
        &state.pool,
        &state.event_bus,
        auth.user_id,
        action,
        target_id,
        input.details.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: award })))
}
