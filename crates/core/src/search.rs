use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::product::Product;
use crate::ranking::Ranker;

/// Minimum query length, in characters, before suggestions are computed.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// Maximum suggestions shown for a query.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPolicy {
    pub min_query_chars: usize,
    pub max_suggestions: usize,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self { min_query_chars: DEFAULT_MIN_QUERY_CHARS, max_suggestions: DEFAULT_MAX_SUGGESTIONS }
    }
}

/// Maps the current query to ranked suggestions. Suggestions are recomputed
/// synchronously on every query change, so they always belong to the latest
/// query.
#[derive(Clone, Debug)]
pub struct SearchSession {
    catalog: Arc<Catalog>,
    ranker: Ranker,
    policy: SearchPolicy,
    query: String,
    suggestions: Vec<Product>,
}

impl SearchSession {
    pub fn new(catalog: Arc<Catalog>, ranker: Ranker, policy: SearchPolicy) -> Self {
        Self { catalog, ranker, policy, query: String::new(), suggestions: Vec::new() }
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> &[Product] {
        self.query = text.into();
        self.suggestions = self.compute_suggestions();
        tracing::debug!(
            event_name = "search.query_changed",
            query_chars = self.query.chars().count(),
            suggestions = self.suggestions.len(),
            "suggestions recomputed"
        );
        &self.suggestions
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.suggestions.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Product] {
        &self.suggestions
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    fn compute_suggestions(&self) -> Vec<Product> {
        if self.query.chars().count() < self.policy.min_query_chars {
            return Vec::new();
        }

        let matches = self.catalog.matching_name(&self.query);
        let mut ranked = self.ranker.rank(&matches);
        ranked.truncate(self.policy.max_suggestions);
        ranked
    }
}
