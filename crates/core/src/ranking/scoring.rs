//! Scoring and ordering of products

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Weights for the composite score components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight applied to the 0-5 rating (default: 0.5)
    pub rating: f64,
    /// Weight applied to the 0-100 popularity (default: 0.3)
    pub popularity: f64,
    /// Weight applied to the discount percentage (default: 0.2)
    pub discount: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// A product paired with its composite score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: f64,
}

/// Orders products by descending composite score
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    /// Create a ranker with default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Composite desirability score for a single product
    pub fn score(&self, product: &Product) -> f64 {
        product.rating * self.weights.rating
            + product.popularity * self.weights.popularity
            + product.discount * self.weights.discount
    }

    /// Products with their scores, best first. Equal scores keep input order.
    pub fn ranked_scores(&self, products: &[Product]) -> Vec<ScoredProduct> {
        let mut scored: Vec<ScoredProduct> = products
            .iter()
            .map(|product| ScoredProduct { score: self.score(product), product: product.clone() })
            .collect();

        // `sort_by` is stable, which the tie ordering relies on.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// A new, ranked copy of `products`; the input is left untouched.
    pub fn rank(&self, products: &[Product]) -> Vec<Product> {
        self.ranked_scores(products).into_iter().map(|scored| scored.product).collect()
    }
}
