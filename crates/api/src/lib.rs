//! Emporium API - store catalog REST service library.
//!
//! The binary in `main.rs` wires this library to the network; the `cli` and
//! `integration-tests` crates reuse the same modules directly.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - Document access: store CRUD, product sub-document mutation
//! - [`error`] - Application error type and HTTP mapping
//! - [`models`] - Document bodies, inputs, and list query construction
//! - [`routes`] - Axum route handlers
//! - [`state`] - Shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
