//! Store collection handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;

use emporium_core::StoreKey;

use crate::db::StoreRepository;
use crate::error::AppError;
use crate::models::store::{
    CreateStoreInput, Store, StoreListParams, StoreListQuery, StoreRecord, UpdateStoreInput,
};
use crate::state::AppState;

/// Create a store.
///
/// `createdAt` is stamped here, once, and never mutated afterwards.
///
/// # Errors
///
/// Returns a conflict if the generated key collides with an existing one.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateStoreInput>,
) -> Result<(StatusCode, Json<StoreRecord>), AppError> {
    let store = Store {
        name: input.name,
        created_at: Utc::now(),
        active: input.active,
        products: Vec::new(),
    };

    let record = StoreRepository::new(state.pool()).create(&store).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// List stores, paged and filtered, or all of them when no knob is supplied.
///
/// # Errors
///
/// Returns a server-side failure if the query executor reports non-success;
/// an empty result set is a success.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<StoreListParams>,
) -> Result<Json<Vec<StoreRecord>>, AppError> {
    let repo = StoreRepository::new(state.pool());

    let records = if params.is_unbounded() {
        repo.list_all().await?
    } else {
        repo.list(&StoreListQuery::from(&params)).await?
    };

    Ok(Json(records))
}

/// Fetch one store by its key.
///
/// # Errors
///
/// Returns not-found if the key is absent.
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<StoreKey>,
) -> Result<Json<StoreRecord>, AppError> {
    let record = StoreRepository::new(state.pool()).get(key).await?;

    Ok(Json(record))
}

/// Replace a store's mutable fields.
///
/// Fetches the current document, applies `name` and `active`, and writes the
/// full merged body back; `createdAt` and the product array are preserved.
/// Last writer wins - there is no revision check.
///
/// # Errors
///
/// Returns not-found if the key is absent.
pub async fn update(
    State(state): State<AppState>,
    Path(key): Path<StoreKey>,
    Json(input): Json<UpdateStoreInput>,
) -> Result<Json<StoreRecord>, AppError> {
    let repo = StoreRepository::new(state.pool());

    let mut record = repo.get(key).await?;
    record.store.name = input.name;
    record.store.active = input.active;

    let updated = repo.replace(key, &record.store).await?;

    Ok(Json(updated))
}

/// Delete a store and, with it, every embedded product.
///
/// # Errors
///
/// Returns not-found if the key is absent.
pub async fn remove(
    State(state): State<AppState>,
    Path(key): Path<StoreKey>,
) -> Result<StatusCode, AppError> {
    StoreRepository::new(state.pool()).delete(key).await?;

    Ok(StatusCode::NO_CONTENT)
}
