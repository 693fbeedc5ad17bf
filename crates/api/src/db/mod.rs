//! Document access for the store catalog (`PostgreSQL`, document-style).
//!
//! # Storage model
//!
//! One table, `catalog.store`, holds one JSONB body per Store document keyed
//! by an opaque generated UUID. Whole-document CRUD goes through
//! [`StoreRepository`]; the embedded `products` array is mutated in place
//! through JSONB sub-document operators by [`ProductRepository`], so the
//! parent body is never transferred on an array change.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p emporium-cli -- migrate
//! ```

pub mod products;
pub mod stores;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use products::ProductRepository;
pub use stores::StoreRepository;

/// Upper bound on any single document mutation.
///
/// A write that exceeds this surfaces as [`RepositoryError::Timeout`] instead
/// of hanging the caller.
pub(crate) const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store document does not exist.
    #[error("store not found")]
    StoreNotFound,

    /// The store exists but holds no product with the requested id.
    #[error("product not found in store")]
    ProductNotFound,

    /// Key collision on insert.
    #[error("key already exists")]
    AlreadyExists,

    /// The query executor reported a non-success outcome.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A document mutation exceeded its time bound.
    #[error("operation timed out")]
    Timeout,

    /// A resolved array position was no longer valid at mutation time.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool is opened once at startup, shared across requests, and closed at
/// shutdown; repositories borrow it rather than owning connections.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run a mutation future under [`WRITE_TIMEOUT`].
///
/// The inner result is handed back untouched so call sites can map driver
/// errors themselves (e.g. unique violations to [`RepositoryError::AlreadyExists`]).
pub(crate) async fn bounded<F: std::future::Future>(fut: F) -> Result<F::Output, RepositoryError> {
    tokio::time::timeout(WRITE_TIMEOUT, fut)
        .await
        .map_err(|_| RepositoryError::Timeout)
}
