use axum::routing::{get, post};
use axum::Router;

use crate::handlers::spoons;
use crate::state::AppState;

/// Routes mounted at `/spoons`.
///
/// ```text
/// GET    /                          -> get_balance
/// GET    /transactions              -> list_transactions
/// POST   /award                     -> award
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(spoons::get_balance))
        .route("/transactions", get(spoons::list_transactions))
        .route("/award", post(spoons::award))
}
