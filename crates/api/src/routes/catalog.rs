use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
///
/// ```text
/// GET    /goodies                   -> list_goodies
/// GET    /cats                      -> list_cats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/goodies", get(catalog::list_goodies))
        .route("/cats", get(catalog::list_cats))
}
