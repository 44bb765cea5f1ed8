//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Joined read models where handlers need catalog fields
//! - `Deserialize` / plain input DTOs for writes
//!
//! Text columns holding enum values (`category`, `rarity`) are parsed into
//! core types through accessor methods; an unparseable stored value is an
//! internal error, not a silent cast.

use baba_core::error::CoreError;

pub mod cat;
pub mod cat_visit;
pub mod goodie;
pub mod inventory;
pub mod placed_item;
pub mod spoon;
pub mod user;

/// Re-tag a parse failure on stored data as an internal error.
pub(crate) fn stored<T>(
    entity: &'static str,
    id: i64,
    parsed: Result<T, CoreError>,
) -> Result<T, CoreError> {
    parsed.map_err(|e| CoreError::Internal(format!("Corrupt {entity} row {id}: {e}")))
}
