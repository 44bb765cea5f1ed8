//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use baba_core::error::CoreError;
use baba_core::types::DbId;
use baba_db::repositories::UserRepo;

use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from a JWT Bearer token in the
/// `Authorization` header.
///
/// The local user row is provisioned on first sight, so every handler that
/// takes an `AuthUser` can rely on `user_id` existing:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, uid = %auth.uid, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The identity provider's user id (`claims.sub`).
    pub uid: String,
}

impl AuthUser {
    /// Validate a raw token and resolve the local user.
    ///
    /// Shared by the header extractor and the WebSocket upgrade, which
    /// carries its token in the query string.
    pub async fn from_token(token: &str, state: &AppState) -> Result<Self, AppError> {
        let claims: Claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if claims.sub.trim().is_empty() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Token has an empty subject".into(),
            )));
        }

        let user =
            UserRepo::find_or_create(&state.pool, &claims.sub, claims.email.as_deref()).await?;

        Ok(AuthUser {
            user_id: user.id,
            uid: claims.sub,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        AuthUser::from_token(token, state).await
    }
}
