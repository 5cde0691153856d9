use crate::domain::product::Product;

/// Selects same-category alternatives to a target product.
#[derive(Clone, Debug, Default)]
pub struct SimilarityFinder;

impl SimilarityFinder {
    pub fn new() -> Self {
        Self
    }

    /// Candidates sharing the target's category, excluding the target itself.
    /// Candidate order is preserved.
    pub fn find(&self, target: &Product, candidates: &[Product]) -> Vec<Product> {
        candidates
            .iter()
            .filter(|candidate| candidate.same_category(target) && candidate.id != target.id)
            .cloned()
            .collect()
    }
}
