//! Event delivery to connected clients.
//!
//! The [`EventRelay`] subscribes to the event bus and forwards each event to
//! the WebSocket connections of the user it belongs to.

pub mod relay;

pub use relay::EventRelay;
