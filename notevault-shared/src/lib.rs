//! # Notevault Shared Library
//!
//! This crate contains the types and logic shared between the Notevault
//! auth service (which issues access tokens) and the notes service (which
//! verifies them). The two services are deployed independently and never
//! talk to each other at runtime; the only thing binding them together is
//! the signing secret and algorithm carried by [`auth::token::TokenConfig`].
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, token issuance/verification, bearer middleware
//! - `config`: environment loading for the shared trust configuration
//! - `db`: PostgreSQL connection pool construction
//! - `models`: database models (users, notes)
//! - `storage`: object storage collaborator interface (currently inactive)

pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod storage;

/// Current version of the Notevault shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
