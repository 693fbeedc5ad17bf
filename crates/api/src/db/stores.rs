//! Store document repository: whole-document CRUD and list queries.
//!
//! Whole-document replace is used for top-level attributes rather than
//! per-field patching: the parent object is small and infrequently written.
//! There is no revision token, so concurrent replaces are last-writer-wins.
//!
//! Filter values, limit, and offset are always passed as bound parameters,
//! never interpolated into query text.

use sqlx::PgPool;
use sqlx::types::Json;

use emporium_core::StoreKey;

use super::{RepositoryError, bounded};
use crate::models::store::{Store, StoreListQuery, StoreRecord};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for keyed document reads.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    key: StoreKey,
    body: Json<Store>,
}

impl From<StoreRow> for StoreRecord {
    fn from(row: StoreRow) -> Self {
        Self {
            key: row.key,
            store: row.body.0,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for whole-document store operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Point operations
    // =========================================================================

    /// Insert a new store document under a freshly generated key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::AlreadyExists` if the generated key is
    /// already occupied. Collisions are not expected in normal operation but
    /// are surfaced as a conflict, never swallowed.
    pub async fn create(&self, store: &Store) -> Result<StoreRecord, RepositoryError> {
        let key = StoreKey::generate();

        bounded(
            sqlx::query("INSERT INTO catalog.store (key, body) VALUES ($1, $2)")
                .bind(key)
                .bind(Json(store))
                .execute(self.pool),
        )
        .await?
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::AlreadyExists;
            }
            RepositoryError::Database(e)
        })?;

        Ok(StoreRecord {
            key,
            store: store.clone(),
        })
    }

    /// Fetch the full document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StoreNotFound` if the key is absent.
    pub async fn get(&self, key: StoreKey) -> Result<StoreRecord, RepositoryError> {
        let body: Option<Json<Store>> =
            sqlx::query_scalar("SELECT body FROM catalog.store WHERE key = $1")
                .bind(key)
                .fetch_optional(self.pool)
                .await?;

        body.map(|Json(store)| StoreRecord { key, store })
            .ok_or(RepositoryError::StoreNotFound)
    }

    /// Unconditionally overwrite the document body at `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StoreNotFound` if the key does not exist.
    pub async fn replace(
        &self,
        key: StoreKey,
        store: &Store,
    ) -> Result<StoreRecord, RepositoryError> {
        let result = bounded(
            sqlx::query("UPDATE catalog.store SET body = $2 WHERE key = $1")
                .bind(key)
                .bind(Json(store))
                .execute(self.pool),
        )
        .await??;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::StoreNotFound);
        }

        Ok(StoreRecord {
            key,
            store: store.clone(),
        })
    }

    /// Delete the document stored under `key`.
    ///
    /// The zero-rows-affected check doubles as the existence check, without a
    /// separate read-then-remove round trip.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StoreNotFound` if the key does not exist.
    pub async fn delete(&self, key: StoreKey) -> Result<(), RepositoryError> {
        let result = bounded(
            sqlx::query("DELETE FROM catalog.store WHERE key = $1")
                .bind(key)
                .execute(self.pool),
        )
        .await??;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::StoreNotFound);
        }

        Ok(())
    }

    // =========================================================================
    // List queries
    // =========================================================================

    /// List stores matching the query, most recent first.
    ///
    /// The name filter is a case-sensitive substring match (`LIKE` against a
    /// bound `%filter%` pattern); rows are ordered by `createdAt` descending
    /// and bounded by the query's limit and offset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::QueryFailed` if the executor reports a
    /// non-success outcome. An empty page is a success, not a failure.
    pub async fn list(&self, query: &StoreListQuery) -> Result<Vec<StoreRecord>, RepositoryError> {
        let rows: Vec<StoreRow> = sqlx::query_as(
            r#"
            SELECT key, body
            FROM catalog.store
            WHERE ($1::text IS NULL OR body ->> 'name' LIKE $1)
            ORDER BY (body ->> 'createdAt')::timestamptz DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.like_pattern())
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List every store, most recent first, with no filter and no bounds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::QueryFailed` if the executor reports a
    /// non-success outcome.
    pub async fn list_all(&self) -> Result<Vec<StoreRecord>, RepositoryError> {
        let rows: Vec<StoreRow> = sqlx::query_as(
            r#"
            SELECT key, body
            FROM catalog.store
            ORDER BY (body ->> 'createdAt')::timestamptz DESC
            "#,
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
