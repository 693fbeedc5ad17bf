//! Seed the catalog with sample data.
//!
//! Goes through the real repositories rather than raw SQL, so seeding
//! exercises the same code paths the API serves.

use chrono::Utc;
use rust_decimal::Decimal;

use emporium_api::config::{ApiConfig, ConfigError};
use emporium_api::db::{self, ProductRepository, RepositoryError, StoreRepository};
use emporium_api::models::store::{ProductInput, Store};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

const SAMPLE_NAMES: &[&str] = &[
    "Harbor Market",
    "Corner Shop",
    "North End Deli",
    "Midtown Grocer",
    "Lakeside Pantry",
];

/// (name, price in cents)
const SAMPLE_PRODUCTS: &[(&str, i64)] = &[
    ("Espresso", 250),
    ("Sourdough Loaf", 650),
    ("Olive Oil", 1200),
];

/// Create `count` sample stores, each with a handful of products.
///
/// # Errors
///
/// Returns `SeedError` if configuration, connection, or any insert fails.
pub async fn run(count: usize) -> Result<(), SeedError> {
    let config = ApiConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let stores = StoreRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    for i in 0..count {
        let name = SAMPLE_NAMES
            .get(i % SAMPLE_NAMES.len())
            .copied()
            .unwrap_or("Store");

        let store = Store {
            name: name.to_owned(),
            created_at: Utc::now(),
            active: true,
            products: Vec::new(),
        };
        let record = stores.create(&store).await?;

        for (product_name, cents) in SAMPLE_PRODUCTS {
            let input = ProductInput {
                name: (*product_name).to_owned(),
                price: Decimal::new(*cents, 2),
            };
            products.append(record.key, &input).await?;
        }

        tracing::info!(key = %record.key, name = %record.store.name, "Seeded store");
    }

    let all = stores.list_all().await?;
    tracing::info!("Catalog now holds {} stores", all.len());

    Ok(())
}
