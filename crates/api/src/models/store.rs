//! Store catalog domain models.
//!
//! `Store` is the unit of storage: its serialized form is exactly the JSONB
//! document body persisted in `catalog.store`. Products have no storage
//! location of their own; they live inside the parent's `products` array.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use emporium_core::{ProductId, StoreKey};

/// Default number of stores per page when pagination is requested.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A store document.
///
/// Field names follow the wire contract of the persisted body (`createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Display name; the list filter matches against this.
    pub name: String,
    /// Set once when the store is created, never mutated afterwards.
    pub created_at: DateTime<Utc>,
    /// Whether the store is open for business.
    pub active: bool,
    /// Embedded products, in append order. A position is only meaningful
    /// against the snapshot it was resolved from.
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product embedded in exactly one store document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned at creation, unique within the parent's array.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price, carried as a JSON number in the document body.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// A store document together with its opaque key.
///
/// Every read that returns documents tags each one with its key; the key is
/// not part of the body itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Opaque key the document is stored under.
    pub key: StoreKey,
    /// The document body.
    pub store: Store,
}

/// Input for creating a store. `createdAt` is server-assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoreInput {
    /// Display name.
    pub name: String,
    /// Whether the store is open for business.
    pub active: bool,
}

/// Input for replacing a store's two mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStoreInput {
    /// Display name.
    pub name: String,
    /// Whether the store is open for business.
    pub active: bool,
}

/// Input for creating or editing a product. The id is never client-supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    /// Display name.
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Raw list knobs as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListParams {
    /// Substring to match against store names.
    pub filter: Option<String>,
    /// Zero-based page number.
    pub page_index: Option<i64>,
    /// Stores per page.
    pub page_size: Option<i64>,
}

impl StoreListParams {
    /// True when no knob was supplied at all, i.e. the unbounded list.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.filter.is_none() && self.page_index.is_none() && self.page_size.is_none()
    }
}

/// Validated query for the paged, filtered store list.
///
/// A negative `pageIndex` is reinterpreted by absolute value rather than
/// rejected; a blank or whitespace-only filter means no filter. The pattern,
/// limit, and offset produced here are always passed to the executor as bound
/// parameters, never interpolated into query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreListQuery {
    filter: Option<String>,
    page_index: i64,
    page_size: i64,
}

impl StoreListQuery {
    /// Build a validated list query from raw knob values.
    #[must_use]
    pub fn new(filter: Option<&str>, page_index: i64, page_size: i64) -> Self {
        let filter = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_owned);

        Self {
            filter,
            page_index: page_index.abs(),
            page_size,
        }
    }

    /// `LIKE` pattern for the name filter, if one was supplied.
    ///
    /// Matching is case-sensitive (`LIKE` semantics of the backing store);
    /// `%`/`_` inside the supplied filter keep their wildcard meaning.
    #[must_use]
    pub fn like_pattern(&self) -> Option<String> {
        self.filter.as_ref().map(|f| format!("%{f}%"))
    }

    /// Maximum number of rows for the requested page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.page_size
    }

    /// Offset of the first row of the requested page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page_index * self.page_size
    }
}

impl From<&StoreListParams> for StoreListQuery {
    fn from(params: &StoreListParams) -> Self {
        Self::new(
            params.filter.as_deref(),
            params.page_index.unwrap_or(0),
            params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}
