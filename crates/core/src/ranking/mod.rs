//! Composite-score ranking of catalog products.

mod scoring;

pub use scoring::{Ranker, ScoredProduct, ScoringWeights};

/// Default scoring weights
pub const DEFAULT_WEIGHTS: ScoringWeights =
    ScoringWeights { rating: 0.5, popularity: 0.3, discount: 0.2 };
