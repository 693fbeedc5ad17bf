//! HTTP route handlers for the store catalog API.
//!
//! # Route Structure
//!
//! ```text
//! # Stores
//! POST   /api/stores                             - Create store
//! GET    /api/stores                             - List stores (filter, pageIndex, pageSize)
//! GET    /api/stores/{key}                       - Fetch store by key
//! PUT    /api/stores/{key}                       - Replace store (name, active)
//! DELETE /api/stores/{key}                       - Delete store
//!
//! # Products (embedded in a store document)
//! POST   /api/stores/{key}/products              - Append product
//! GET    /api/stores/{key}/products              - List products
//! PUT    /api/stores/{key}/products/{product_id} - Edit product
//! DELETE /api/stores/{key}/products/{product_id} - Delete product
//! ```

pub mod products;
pub mod stores;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(stores::create).get(stores::index))
        .route(
            "/{key}",
            get(stores::show).put(stores::update).delete(stores::remove),
        )
}

/// Create the product routes router, nested under a store key.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create).get(products::index))
        .route(
            "/{product_id}",
            put(products::update).delete(products::remove),
        )
}

/// Assemble the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/stores", store_routes())
        .nest("/api/stores/{key}/products", product_routes())
}
