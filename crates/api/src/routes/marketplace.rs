use axum::routing::post;
use axum::Router;

use crate::handlers::marketplace;
use crate::state::AppState;

/// Routes mounted at `/marketplace`.
///
/// ```text
/// POST   /purchase                  -> purchase
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/purchase", post(marketplace::purchase))
}
