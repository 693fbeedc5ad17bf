//! Embedded product handlers.
//!
//! Products are sub-documents of a store; these handlers never transfer the
//! parent document, they delegate to the sub-document mutation repository.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use emporium_core::{ProductId, StoreKey};

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::store::{Product, ProductInput};
use crate::state::AppState;

/// Append a product to a store. The product id is server-assigned.
///
/// # Errors
///
/// Returns not-found if the store is absent.
pub async fn create(
    State(state): State<AppState>,
    Path(key): Path<StoreKey>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = ProductRepository::new(state.pool())
        .append(key, &input)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// List a store's products in array order.
///
/// # Errors
///
/// Returns not-found if the store is absent.
pub async fn index(
    State(state): State<AppState>,
    Path(key): Path<StoreKey>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list(key).await?;

    Ok(Json(products))
}

/// Edit the product with the given id.
///
/// # Errors
///
/// Returns not-found if the store is absent or holds no product with this id
/// (the two cases carry distinct messages), and a conflict if the product
/// array keeps changing underneath the write.
pub async fn update(
    State(state): State<AppState>,
    Path((key, product_id)): Path<(StoreKey, ProductId)>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, AppError> {
    let product = Product {
        id: product_id,
        name: input.name,
        price: input.price,
    };

    let updated = ProductRepository::new(state.pool())
        .edit(key, &product)
        .await?;

    Ok(Json(updated))
}

/// Remove the product with the given id.
///
/// # Errors
///
/// Returns not-found if the store is absent or holds no product with this id,
/// and a conflict if the product array keeps changing underneath the write.
pub async fn remove(
    State(state): State<AppState>,
    Path((key, product_id)): Path<(StoreKey, ProductId)>,
) -> Result<StatusCode, AppError> {
    ProductRepository::new(state.pool())
        .remove(key, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
