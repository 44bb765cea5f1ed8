//! Domain rules for the Baba Selo yard economy.
//!
//! This crate has zero internal dependencies so the same rules can be used
//! by the repository layer, the HTTP handlers, and the background visit
//! simulator without pulling in a database or web framework.

pub mod catalog;
pub mod error;
pub mod history;
pub mod profile;
pub mod rarity;
pub mod spoons;
pub mod types;
pub mod visits;
pub mod yard;
