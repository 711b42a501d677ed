//! # Notevault Notes Service
//!
//! The resource service: stores and serves notes, trusting bearer tokens
//! minted by the auth service. Trust is established entirely by verifying
//! the token signature and expiry against the shared secret; this service
//! never contacts the auth service.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `routes`: route handlers (notes CRUD, health)

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
