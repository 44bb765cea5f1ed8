//! Route definitions for the `/yard` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{history, yard};
use crate::state::AppState;

/// Routes mounted at `/yard`.
///
/// ```text
/// GET    /                          -> get_yard
/// POST   /slots/{slot_id}           -> place_item
/// DELETE /slots/{slot_id}           -> return_item
/// POST   /check-visits              -> check_visits
///
/// GET    /visits                    -> list_visits
/// GET    /visits/unread-count       -> unread_count
/// POST   /visits/read-all           -> mark_all_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Placement board
        .route("/", get(yard::get_yard))
        .route(
            "/slots/{slot_id}",
            post(yard::place_item).delete(yard::return_item),
        )
        .route("/check-visits", post(yard::check_visits))
        // Visit history
        .route("/visits", get(history::list_visits))
        .route("/visits/unread-count", get(history::unread_count))
        .route("/visits/read-all", post(history::mark_all_read))
}
