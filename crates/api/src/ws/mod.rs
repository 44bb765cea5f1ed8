//! WebSocket push channel.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler. Every connection belongs to an authenticated user; the
//! notification relay delivers that user's events over it.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
