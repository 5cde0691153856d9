use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A catalog record. Prices are in minor currency units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    /// 0.0 - 5.0
    pub rating: f64,
    /// Percentage, 0.0 - 100.0
    pub discount: f64,
    /// 0.0 - 100.0
    pub popularity: f64,
    pub category: String,
}

impl Product {
    pub fn same_category(&self, other: &Product) -> bool {
        self.category == other.category
    }

    /// Case-insensitive substring match against the product name.
    pub fn name_matches(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
    }
}
