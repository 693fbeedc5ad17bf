//! Tests for positional resolution of embedded products.
//!
//! A position resolved from one snapshot of the array is only valid until the
//! array structurally changes; these tests pin down both the resolution rules
//! and the staleness a concurrent change introduces.

use rust_decimal::Decimal;

use emporium_api::db::products::position_of_product;
use emporium_api::models::store::Product;
use emporium_core::ProductId;

fn product_named(name: &str) -> Product {
    Product {
        id: ProductId::generate(),
        name: name.to_owned(),
        price: Decimal::new(100, 2),
    }
}

#[test]
fn test_position_follows_append_order() {
    let products = vec![
        product_named("Espresso"),
        product_named("Sourdough Loaf"),
        product_named("Olive Oil"),
    ];

    for (expected, product) in products.iter().enumerate() {
        assert_eq!(position_of_product(&products, product.id), Some(expected));
    }
}

#[test]
fn test_position_resolves_by_id_not_name() {
    // Two products may share a name; only the id identifies one.
    let first = product_named("Espresso");
    let second = product_named("Espresso");
    let products = vec![first.clone(), second.clone()];

    assert_eq!(position_of_product(&products, first.id), Some(0));
    assert_eq!(position_of_product(&products, second.id), Some(1));
}

#[test]
fn test_missing_id_resolves_to_none() {
    let products = vec![product_named("Espresso")];
    assert_eq!(position_of_product(&products, ProductId::generate()), None);
}

#[test]
fn test_empty_array_resolves_to_none() {
    assert_eq!(position_of_product(&[], ProductId::generate()), None);
}

#[test]
fn test_position_goes_stale_after_removal() {
    // Resolve a position, then remove an earlier element: the old position
    // now addresses a different element (or nothing), which is exactly why
    // positional writes re-check identity at mutation time.
    let mut products = vec![
        product_named("Espresso"),
        product_named("Sourdough Loaf"),
        product_named("Olive Oil"),
    ];
    let target = products.last().expect("non-empty").clone();

    let stale = position_of_product(&products, target.id).expect("present");
    assert_eq!(stale, 2);

    products.remove(0);

    let at_stale_index = products.get(stale);
    assert!(at_stale_index.is_none_or(|p| p.id != target.id));

    // Re-resolving against the fresh snapshot finds the element again.
    assert_eq!(position_of_product(&products, target.id), Some(1));
}
