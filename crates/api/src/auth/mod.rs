//! Authentication primitives.
//!
//! - [`jwt`] -- verification of identity-provider access tokens (and
//!   issuance for tests and local development).

pub mod jwt;
