use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::compare::{CompareList, CompareOutcome, CompareState, ComparisonRow};
use crate::config::AppConfig;
use crate::domain::product::{Product, ProductId};
use crate::errors::{ApplicationError, DomainError};
use crate::ranking::Ranker;
use crate::search::{SearchPolicy, SearchSession};
use crate::similarity::SimilarityFinder;

/// Read-only snapshot of everything a front end renders.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub query: String,
    pub suggestions: Vec<Product>,
    pub state: CompareState,
    pub table: Vec<ComparisonRow>,
    pub recommendations: Vec<Product>,
}

/// Owns the search and compare state of one user session. All mutation goes
/// through the methods below, one event at a time.
#[derive(Clone, Debug)]
pub struct ShopSession {
    session_id: String,
    catalog: Arc<Catalog>,
    search: SearchSession,
    compare: CompareList,
    similarity: SimilarityFinder,
}

impl ShopSession {
    pub fn new(catalog: Arc<Catalog>, ranker: Ranker, policy: SearchPolicy) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            search: SearchSession::new(catalog.clone(), ranker, policy),
            catalog,
            compare: CompareList::new(),
            similarity: SimilarityFinder::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let catalog = Catalog::from_config(&config.catalog)?;
        let ranker = Ranker::with_weights(config.ranking.weights());
        Ok(Self::new(catalog, ranker, config.search.policy()))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn compare(&self) -> &CompareList {
        &self.compare
    }

    pub fn state(&self) -> CompareState {
        self.compare.state()
    }

    pub fn type_query(&mut self, text: impl Into<String>) -> &[Product] {
        self.search.set_query(text)
    }

    /// Adds a product to the comparison, from a suggestion or a
    /// recommendation card, and resets the search box.
    pub fn select(&mut self, product_id: ProductId) -> Result<CompareOutcome, DomainError> {
        let Some(product) = self.catalog.find(product_id).cloned() else {
            tracing::warn!(
                event_name = "compare.select_rejected",
                correlation_id = %self.session_id,
                product_id = %product_id,
                "selected product is not in the catalog"
            );
            return Err(DomainError::UnknownProduct(product_id));
        };

        let outcome = self.compare.add(product);
        self.search.clear();
        tracing::debug!(
            event_name = "compare.product_selected",
            correlation_id = %self.session_id,
            product_id = %product_id,
            change = ?outcome.change,
            from = ?outcome.from,
            to = ?outcome.to,
            "compare list updated"
        );
        Ok(outcome)
    }

    pub fn remove(&mut self, product_id: ProductId) -> CompareOutcome {
        let outcome = self.compare.remove(product_id);
        tracing::debug!(
            event_name = "compare.product_removed",
            correlation_id = %self.session_id,
            product_id = %product_id,
            change = ?outcome.change,
            from = ?outcome.from,
            to = ?outcome.to,
            "compare list updated"
        );
        outcome
    }

    /// Same-category alternatives, only while exactly one product is selected.
    pub fn recommendations(&self) -> Vec<Product> {
        match self.compare.single() {
            Some(selected) => self.similarity.find(selected, self.catalog.products()),
            None => Vec::new(),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.session_id.clone(),
            query: self.search.query().to_string(),
            suggestions: self.search.suggestions().to_vec(),
            state: self.state(),
            table: self.compare.table(),
            recommendations: self.recommendations(),
        }
    }
}
