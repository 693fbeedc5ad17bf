//! Integration tests for Emporium.
//!
//! # Running Tests
//!
//! ```bash
//! # Logic tests (no external services)
//! cargo test -p emporium-integration-tests
//!
//! # Live tests (require PostgreSQL; the api_surface tests also require a
//! # running server: cargo run -p emporium-api)
//! cargo test -p emporium-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `store_documents` - Document body layout and key behavior
//! - `product_mutation` - Positional resolution of embedded products
//! - `store_queries` - List query construction and pagination arithmetic
//! - `repository_live` - Repository operations against a real database
//! - `api_surface` - REST surface tests against a running server
