//! # Taskbook Shared Library
//!
//! This crate contains the models, authentication primitives and database
//! layer used by the Taskbook API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing, token issuance and request authentication
//! - `db`: Connection pooling and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskbook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
