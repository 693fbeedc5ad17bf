//! Product sub-document repository.
//!
//! Mutates the `products` array embedded in a store document through JSONB
//! path operators, so the parent body is never transferred on an array
//! change. Positional writes address an element by array index; an index
//! resolved from a read is only valid until the array structurally changes,
//! so every positional statement re-checks bounds and element identity before
//! touching anything. A guard miss is retried once against a fresh snapshot,
//! then surfaced as a conflict.

use sqlx::PgPool;
use sqlx::types::Json;

use emporium_core::{ProductId, StoreKey};

use super::{RepositoryError, bounded};
use crate::models::store::{Product, ProductInput};

/// Attempts at a positional write before staleness is surfaced as a
/// conflict: the initial write plus one re-resolve retry.
const POSITIONAL_WRITE_ATTEMPTS: u32 = 2;

/// Locate a product by id within an array snapshot.
///
/// The returned position is only meaningful against this snapshot; mutations
/// re-resolve it and re-check identity at write time.
#[must_use]
pub fn position_of_product(products: &[Product], id: ProductId) -> Option<usize> {
    products.iter().position(|p| p.id == id)
}

/// Repository for the embedded product collection of a store.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a product to a store's array, assigning it a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StoreNotFound` if the parent document does
    /// not exist.
    pub async fn append(
        &self,
        store_key: StoreKey,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let product = Product {
            id: ProductId::generate(),
            name: input.name.clone(),
            price: input.price,
        };

        let result = bounded(
            sqlx::query(
                r#"
                UPDATE catalog.store
                SET body = jsonb_set(
                    body,
                    '{products}',
                    coalesce(body -> 'products', '[]'::jsonb) || jsonb_build_array($2::jsonb)
                )
                WHERE key = $1
                "#,
            )
            .bind(store_key)
            .bind(Json(&product))
            .execute(self.pool),
        )
        .await??;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::StoreNotFound);
        }

        Ok(product)
    }

    /// Fetch only the `products` sub-document of a store, in array order.
    ///
    /// A document without the array yields the empty sequence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StoreNotFound` if the parent document does
    /// not exist.
    pub async fn list(&self, store_key: StoreKey) -> Result<Vec<Product>, RepositoryError> {
        let row: Option<Option<Json<Vec<Product>>>> =
            sqlx::query_scalar("SELECT body -> 'products' FROM catalog.store WHERE key = $1")
                .bind(store_key)
                .fetch_optional(self.pool)
                .await?;

        match row {
            None => Err(RepositoryError::StoreNotFound),
            Some(None) => Ok(Vec::new()),
            Some(Some(Json(products))) => Ok(products),
        }
    }

    /// Replace the product whose id equals `product.id`, in place.
    ///
    /// The array position is resolved from the current snapshot, then the
    /// positional replace re-checks bounds and element identity in the same
    /// statement, so a stale index can never hit a different element.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StoreNotFound` if the store is absent,
    /// `RepositoryError::ProductNotFound` if the store holds no product with
    /// this id, and `RepositoryError::Conflict` if the array keeps changing
    /// underneath the write.
    pub async fn edit(
        &self,
        store_key: StoreKey,
        product: &Product,
    ) -> Result<Product, RepositoryError> {
        for _ in 0..POSITIONAL_WRITE_ATTEMPTS {
            let index = self.resolve_position(store_key, product.id).await?;

            let result = bounded(
                sqlx::query(
                    r#"
                    UPDATE catalog.store
                    SET body = jsonb_set(body, ARRAY['products', $2::text], $3::jsonb)
                    WHERE key = $1
                      AND body -> 'products' -> $2::int ->> 'id' = $4
                    "#,
                )
                .bind(store_key)
                .bind(index)
                .bind(Json(product))
                .bind(product.id.to_string())
                .execute(self.pool),
            )
            .await??;

            if result.rows_affected() == 1 {
                return Ok(product.clone());
            }

            tracing::debug!(
                %store_key,
                product_id = %product.id,
                index,
                "positional replace raced with a concurrent array change, re-resolving"
            );
        }

        Err(RepositoryError::Conflict(
            "product array changed during edit".to_owned(),
        ))
    }

    /// Remove the product with the given id from a store's array.
    ///
    /// Same resolve-then-guarded-write pattern as [`Self::edit`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StoreNotFound` if the store is absent,
    /// `RepositoryError::ProductNotFound` if the store holds no product with
    /// this id, and `RepositoryError::Conflict` if the array keeps changing
    /// underneath the write.
    pub async fn remove(
        &self,
        store_key: StoreKey,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        for _ in 0..POSITIONAL_WRITE_ATTEMPTS {
            let index = self.resolve_position(store_key, product_id).await?;

            let result = bounded(
                sqlx::query(
                    r#"
                    UPDATE catalog.store
                    SET body = body #- ARRAY['products', $2::text]
                    WHERE key = $1
                      AND body -> 'products' -> $2::int ->> 'id' = $3
                    "#,
                )
                .bind(store_key)
                .bind(index)
                .bind(product_id.to_string())
                .execute(self.pool),
            )
            .await??;

            if result.rows_affected() == 1 {
                return Ok(());
            }

            tracing::debug!(
                %store_key,
                product_id = %product_id,
                index,
                "positional removal raced with a concurrent array change, re-resolving"
            );
        }

        Err(RepositoryError::Conflict(
            "product array changed during removal".to_owned(),
        ))
    }

    /// Resolve the current array position of a product id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StoreNotFound` if the store is absent and
    /// `RepositoryError::ProductNotFound` if the id is missing from an
    /// existing store - the two cases are deliberately distinct.
    async fn resolve_position(
        &self,
        store_key: StoreKey,
        id: ProductId,
    ) -> Result<i32, RepositoryError> {
        let products = self.list(store_key).await?;
        let position =
            position_of_product(&products, id).ok_or(RepositoryError::ProductNotFound)?;

        i32::try_from(position).map_err(|_| {
            RepositoryError::DataCorruption("product array exceeds addressable range".to_owned())
        })
    }
}
