//! Visit history paging rules.
//!
//! The history is append-only; the only mutation is flipping read flags.
//! Listing is paginated server-side so large histories are never fetched
//! whole.

/// Default page size for history listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size for history listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
