//! REST surface tests against a running api server.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The api server running (cargo run -p emporium-api)
//!
//! Run with: `cargo test -p emporium-integration-tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the api (configurable via environment).
fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Test helper: create a store via the API and return its `{key, store}` record.
async fn create_test_store(client: &Client, name: &str) -> Value {
    let resp = client
        .post(format!("{}/api/stores", api_base_url()))
        .json(&json!({"name": name, "active": true}))
        .send()
        .await
        .expect("Failed to create test store");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to read create response")
}

/// Test helper: delete a store, ignoring the outcome.
async fn delete_test_store(client: &Client, key: &str) {
    let _ = client
        .delete(format!("{}/api/stores/{key}", api_base_url()))
        .send()
        .await;
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running api server"]
async fn test_health_endpoints() {
    let client = Client::new();
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("health request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("health body"), "ok");

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("readiness request");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Store CRUD
// ============================================================================

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn test_store_round_trip() {
    let client = Client::new();
    let base_url = api_base_url();

    let created = create_test_store(&client, "Round Trip Market").await;
    let key = created["key"].as_str().expect("key in response").to_owned();
    let created_at = created["store"]["createdAt"]
        .as_str()
        .expect("server-assigned createdAt")
        .to_owned();

    // Fetch returns an identical body.
    let fetched: Value = client
        .get(format!("{base_url}/api/stores/{key}"))
        .send()
        .await
        .expect("fetch request")
        .json()
        .await
        .expect("fetch body");
    assert_eq!(fetched["store"], created["store"]);

    // Replace applies the two mutable fields and keeps createdAt.
    let resp = client
        .put(format!("{base_url}/api/stores/{key}"))
        .json(&json!({"name": "Round Trip Market & Co", "active": false}))
        .send()
        .await
        .expect("replace request");
    assert_eq!(resp.status(), StatusCode::OK);

    let after: Value = client
        .get(format!("{base_url}/api/stores/{key}"))
        .send()
        .await
        .expect("fetch after replace")
        .json()
        .await
        .expect("fetch body");
    assert_eq!(after["store"]["name"], "Round Trip Market & Co");
    assert_eq!(after["store"]["active"], false);
    assert_eq!(after["store"]["createdAt"], Value::String(created_at));

    // Delete removes it; a second fetch is not-found.
    let resp = client
        .delete(format!("{base_url}/api/stores/{key}"))
        .send()
        .await
        .expect("delete request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/api/stores/{key}"))
        .send()
        .await
        .expect("fetch after delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn test_delete_unknown_store_is_not_found() {
    let client = Client::new();
    let resp = client
        .delete(format!("{}/api/stores/{}", api_base_url(), Uuid::new_v4()))
        .send()
        .await
        .expect("delete request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn test_product_lifecycle() {
    let client = Client::new();
    let base_url = api_base_url();

    let created = create_test_store(&client, "Product Lifecycle Deli").await;
    let key = created["key"].as_str().expect("key").to_owned();

    // Append three products.
    let mut ids = Vec::new();
    for (name, price) in [("Espresso", 2.5), ("Sourdough Loaf", 6.5), ("Olive Oil", 12.0)] {
        let resp = client
            .post(format!("{base_url}/api/stores/{key}/products"))
            .json(&json!({"name": name, "price": price}))
            .send()
            .await
            .expect("append request");
        assert_eq!(resp.status(), StatusCode::CREATED);

        let product: Value = resp.json().await.expect("append body");
        assert_eq!(product["name"], *name);
        ids.push(product["id"].as_str().expect("assigned id").to_owned());
    }

    // Listing returns exactly those products in append order.
    let listed: Value = client
        .get(format!("{base_url}/api/stores/{key}/products"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");
    let listed_ids: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(listed_ids, ids);

    // Edit the middle product; the others are untouched.
    let target = ids.get(1).expect("middle product");
    let resp = client
        .put(format!("{base_url}/api/stores/{key}/products/{target}"))
        .json(&json!({"name": "Rye Loaf", "price": 7.0}))
        .send()
        .await
        .expect("edit request");
    assert_eq!(resp.status(), StatusCode::OK);

    let listed: Value = client
        .get(format!("{base_url}/api/stores/{key}/products"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");
    assert_eq!(listed[0]["name"], "Espresso");
    assert_eq!(listed[1]["name"], "Rye Loaf");
    assert_eq!(listed[2]["name"], "Olive Oil");

    // Delete the middle product, then deleting it again is not-found.
    let resp = client
        .delete(format!("{base_url}/api/stores/{key}/products/{target}"))
        .send()
        .await
        .expect("delete request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .delete(format!("{base_url}/api/stores/{key}/products/{target}"))
        .send()
        .await
        .expect("second delete request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    delete_test_store(&client, &key).await;
}

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn test_missing_product_and_missing_store_are_distinguishable() {
    let client = Client::new();
    let base_url = api_base_url();

    let created = create_test_store(&client, "Distinct Errors Market").await;
    let key = created["key"].as_str().expect("key").to_owned();

    // Unknown product inside an existing store.
    let resp = client
        .put(format!(
            "{base_url}/api/stores/{key}/products/{}",
            Uuid::new_v4()
        ))
        .json(&json!({"name": "Phantom", "price": 1.0}))
        .send()
        .await
        .expect("edit request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = resp.text().await.expect("body");
    assert_eq!(body, "product not found in store");

    // Unknown store altogether.
    let resp = client
        .put(format!(
            "{base_url}/api/stores/{}/products/{}",
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .json(&json!({"name": "Phantom", "price": 1.0}))
        .send()
        .await
        .expect("edit request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = resp.text().await.expect("body");
    assert_eq!(body, "store not found");

    delete_test_store(&client, &key).await;
}

// ============================================================================
// List & Pagination
// ============================================================================

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn test_negative_page_index_lists_like_positive() {
    let client = Client::new();
    let base_url = api_base_url();

    let negative: Value = client
        .get(format!("{base_url}/api/stores?pageIndex=-1&pageSize=5"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");
    let positive: Value = client
        .get(format!("{base_url}/api/stores?pageIndex=1&pageSize=5"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");

    assert_eq!(negative, positive);
}

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn test_filter_returns_only_matching_names() {
    let client = Client::new();
    let base_url = api_base_url();

    let marker = format!("filtertest-{}", Uuid::new_v4());
    let created = create_test_store(&client, &format!("{marker} Market")).await;
    let key = created["key"].as_str().expect("key").to_owned();

    let listed: Value = client
        .get(format!("{base_url}/api/stores?filter={marker}"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");

    let rows = listed.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    for row in rows {
        let name = row["store"]["name"].as_str().expect("name");
        assert!(name.contains(&marker));
    }

    delete_test_store(&client, &key).await;
}
