pub mod catalog;
pub mod health;
pub mod inventory;
pub mod marketplace;
pub mod me;
pub mod spoons;
pub mod yard;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket push channel (?token=)
///
/// /me                                  get, update profile (GET, PUT)
///
/// /catalog/goodies                     marketplace catalog (GET)
/// /catalog/cats                        cat catalog (GET)
///
/// /marketplace/purchase                buy a goodie (POST)
///
/// /inventory                           owned units and counts (GET)
///
/// /yard                                board with occupants (GET)
/// /yard/slots/{slot_id}                place (POST), return (DELETE)
/// /yard/check-visits                   run a visit pass for the caller (POST)
/// /yard/visits                         history (?limit, offset, unread_only)
/// /yard/visits/unread-count            unread count (GET)
/// /yard/visits/read-all                mark all read (POST)
///
/// /spoons                              balance + reconciliation (GET)
/// /spoons/transactions                 ledger (?limit, offset)
/// /spoons/award                        fixed-amount earning action (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_handler))
        // Profile
        .nest("/me", me::router())
        // Static catalogs
        .nest("/catalog", catalog::router())
        // Marketplace
        .nest("/marketplace", marketplace::router())
        // Inventory store
        .nest("/inventory", inventory::router())
        // Placement board, visits, history
        .nest("/yard", yard::router())
        // Reward ledger
        .nest("/spoons", spoons::router())
}
