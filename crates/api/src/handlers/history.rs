//! Handlers for the visit history under `/yard/visits`.

use axum::extract::{Query, State};
use axum::Json;
use baba_core::history::{clamp_limit, clamp_offset};
use baba_db::models::cat_visit::CatVisitEntry;
use baba_db::repositories::CatVisitRepo;
use baba_events::{event_types, DomainEvent};
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::VisitHistoryParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// GET /api/v1/yard/visits
///
/// Newest first. `?unread_only=true` restricts both the page and the total
/// to unread visits.
pub async fn list_visits(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<VisitHistoryParams>,
) -> AppResult<Json<DataResponse<Page<CatVisitEntry>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let items = CatVisitRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;

    let total = if params.unread_only {
        CatVisitRepo::unread_count(&state.pool, auth.user_id).await?
    } else {
        CatVisitRepo::count_for_user(&state.pool, auth.user_id).await?
    };

    Ok(Json(DataResponse {
        data: Page {
            items,
            total,
            limit,
            offset,
        },
    }))
}

/// GET /api/v1/yard/visits/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = CatVisitRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": { "unread_count": count } })))
}

/// POST /api/v1/yard/visits/read-all
///
/// Mark every unread visit as read in one statement.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let marked = CatVisitRepo::mark_all_read(&state.pool, auth.user_id).await?;

    if marked > 0 {
        state.event_bus.publish(
            DomainEvent::new(event_types::HISTORY_READ, auth.user_id)
                .with_payload(json!({ "marked": marked })),
        );
    }

    Ok(Json(json!({ "data": { "marked": marked } })))
}
