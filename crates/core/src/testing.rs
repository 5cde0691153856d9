//! Generators shared by the property tests.

use proptest::prelude::*;

use crate::domain::product::{Product, ProductId};

const NAMES: &[&str] = &["Pixel 9", "Pixel Buds", "iPhone 15", "Galaxy Tab", "ThinkPad X1"];
const CATEGORIES: &[&str] = &["Mobile", "Laptop", "Audio"];

/// Products with ids `1..=n` in list order. Attributes come from small value
/// sets so equal scores and shared names are common.
pub(crate) fn products(max_len: usize) -> impl Strategy<Value = Vec<Product>> {
    let attributes = (
        prop::sample::select(NAMES),
        prop::sample::select(vec![1.0, 3.0, 4.5, 5.0]),
        prop::sample::select(vec![0.0, 50.0, 100.0]),
        prop::sample::select(vec![0.0, 10.0, 25.0]),
        prop::sample::select(CATEGORIES),
    );

    prop::collection::vec(attributes, 0..max_len).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (name, rating, popularity, discount, category))| Product {
                id: ProductId(index as u32 + 1),
                name: name.to_string(),
                price: 1_000 * (index as u64 + 1),
                rating,
                discount,
                popularity,
                category: category.to_string(),
            })
            .collect()
    })
}
