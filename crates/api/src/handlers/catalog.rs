//! Handlers for the static catalogs. Any authenticated user may read them.

use axum::extract::State;
use axum::Json;
use baba_db::models::cat::Cat;
use baba_db::models::goodie::Goodie;
use baba_db::repositories::{CatRepo, GoodieRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalog/goodies
pub async fn list_goodies(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Goodie>>>> {
    let goodies = GoodieRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: goodies }))
}

/// GET /api/v1/catalog/cats
pub async fn list_cats(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Cat>>>> {
    let cats = CatRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: cats }))
}
