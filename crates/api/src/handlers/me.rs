//! Handlers for the caller's own profile.

use axum::extract::State;
use axum::Json;
use baba_core::error::CoreError;
use baba_core::profile::{normalize_display_name, validate_username};
use baba_core::types::{DbId, Timestamp};
use baba_db::models::user::{UpdateProfile, User};
use baba_db::repositories::{CatVisitRepo, SpoonRepo, UserRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Profile plus the counters the client shows in its header.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub uid: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub spoon_balance: i64,
    pub unread_visits: i64,
    pub created_at: Timestamp,
}

async fn build_profile(state: &AppState, user: User) -> AppResult<Profile> {
    let spoon_balance = SpoonRepo::balance(&state.pool, user.id).await?;
    let unread_visits = CatVisitRepo::unread_count(&state.pool, user.id).await?;

    Ok(Profile {
        id: user.id,
        uid: user.external_uid,
        email: user.email,
        username: user.username,
        display_name: user.display_name,
        spoon_balance,
        unread_visits,
        created_at: user.created_at,
    })
}

/// GET /api/v1/me
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: auth.user_id,
        })?;

    Ok(Json(DataResponse {
        data: build_profile(&state, user).await?,
    }))
}

/// PUT /api/v1/me
///
/// Update username and/or display name. A username already taken by
/// another user is rejected with 409.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<Profile>>> {
    input.validate()?;

    if let Some(username) = &input.username {
        validate_username(username)?;
    }
    let display_name = input
        .display_name
        .as_deref()
        .map(normalize_display_name)
        .transpose()?;

    let user = UserRepo::update_profile(
        &state.pool,
        auth.user_id,
        input.username.as_deref(),
        display_name.as_deref(),
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "user",
        id: auth.user_id,
    })?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(DataResponse {
        data: build_profile(&state, user).await?,
    }))
}
