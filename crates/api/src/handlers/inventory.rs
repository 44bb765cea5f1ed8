use axum::extract::State;
use axum::Json;
use baba_db::models::inventory::{InventoryEntry, InventorySummary};
use baba_db::repositories::InventoryRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InventoryView {
    /// One entry per owned unit, newest first.
    pub items: Vec<InventoryEntry>,
    /// Unit counts per goodie.
    pub summary: Vec<InventorySummary>,
}

/// GET /api/v1/inventory
pub async fn get_inventory(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<InventoryView>>> {
    let items = InventoryRepo::list_for_user(&state.pool, auth.user_id).await?;
    let summary = InventoryRepo::summary_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: InventoryView { items, summary },
    }))
}
