pub mod catalog;
pub mod compare;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod search;
pub mod session;
pub mod similarity;

#[cfg(test)]
mod testing;

pub use catalog::{Catalog, CatalogError};
pub use compare::{CompareChange, CompareList, CompareOutcome, CompareState, ComparisonRow};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use ranking::{Ranker, ScoredProduct, ScoringWeights};
pub use search::{SearchPolicy, SearchSession};
pub use session::{SessionView, ShopSession};
pub use similarity::SimilarityFinder;
