//! Baba Selo event bus.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the event envelope pushed to a user's live
//!   connections whenever their yard, history, or balance changes.

pub mod bus;

pub use bus::{event_types, DomainEvent, EventBus};
