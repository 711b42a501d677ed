//! # Notevault Auth Service
//!
//! The credential issuer: verifies passwords and mints signed access tokens
//! that the notes service trusts without ever calling back here.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `routes`: route handlers (register, token, health)

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
