//! # Habitrack Shared Library
//!
//! Types, persistence and business logic behind the Habitrack API.
//!
//! ## Module Organization
//!
//! - `auth`: session token verification and the request auth context
//! - `models`: habits, todos and timer settings
//! - `store`: persistence port with Postgres and in-memory implementations
//! - `services`: the service objects route handlers delegate to
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the Habitrack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
