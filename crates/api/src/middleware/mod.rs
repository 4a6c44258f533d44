//! Authentication extractors.
//!
//! - [`auth::AuthAdmin`] -- Requires a valid admin JWT Bearer token.

pub mod auth;
