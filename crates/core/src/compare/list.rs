use serde::{Deserialize, Serialize};

use crate::compare::states::{CompareChange, CompareOutcome, CompareState};
use crate::domain::product::{Product, ProductId};

/// One row of the comparison table. The id doubles as the remove action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub rating: f64,
    pub discount: f64,
    pub popularity: f64,
}

impl From<&Product> for ComparisonRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            rating: product.rating,
            discount: product.discount,
            popularity: product.popularity,
        }
    }
}

/// Insertion-ordered selection of products, unique by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompareList {
    entries: Vec<Product>,
}

impl CompareList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product: Product) -> CompareOutcome {
        let from = self.state();
        let product_id = product.id;
        let change = if self.contains(product_id) {
            CompareChange::AlreadyPresent
        } else {
            self.entries.push(product);
            CompareChange::Added
        };

        CompareOutcome { from, to: self.state(), product_id, change }
    }

    pub fn remove(&mut self, product_id: ProductId) -> CompareOutcome {
        let from = self.state();
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != product_id);
        let change = if self.entries.len() < before {
            CompareChange::Removed
        } else {
            CompareChange::NotPresent
        };

        CompareOutcome { from, to: self.state(), product_id, change }
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries.iter().any(|entry| entry.id == product_id)
    }

    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> CompareState {
        CompareState::for_len(self.entries.len())
    }

    /// The sole entry, when exactly one product is selected.
    pub fn single(&self) -> Option<&Product> {
        match self.entries.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn table(&self) -> Vec<ComparisonRow> {
        self.entries.iter().map(ComparisonRow::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::CompareList;
    use crate::catalog::Catalog;
    use crate::compare::states::{CompareChange, CompareState};
    use crate::domain::product::{Product, ProductId};

    fn builtin(id: u32) -> Product {
        Catalog::builtin().find(ProductId(id)).cloned().unwrap()
    }

    fn ids(list: &CompareList) -> Vec<u32> {
        list.entries().iter().map(|product| product.id.0).collect()
    }

    #[test]
    fn adding_same_product_twice_keeps_one_entry() {
        let mut list = CompareList::new();

        let first = list.add(builtin(2));
        let second = list.add(builtin(2));

        assert_eq!(first.change, CompareChange::Added);
        assert_eq!(second.change, CompareChange::AlreadyPresent);
        assert_eq!(second.from, second.to);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn repeated_adds_never_duplicate_ids() {
        let mut list = CompareList::new();
        for id in [1, 4, 1, 6, 4, 4, 1, 6] {
            list.add(builtin(id));
        }

        assert_eq!(ids(&list), vec![1, 4, 6]);
    }

    #[test]
    fn add_walks_idle_single_multi() {
        let mut list = CompareList::new();
        assert_eq!(list.state(), CompareState::Idle);

        let outcome = list.add(builtin(4));
        assert_eq!((outcome.from, outcome.to), (CompareState::Idle, CompareState::SingleSelected));

        let outcome = list.add(builtin(6));
        assert_eq!(
            (outcome.from, outcome.to),
            (CompareState::SingleSelected, CompareState::MultiSelected)
        );

        let outcome = list.add(builtin(5));
        assert_eq!(
            (outcome.from, outcome.to),
            (CompareState::MultiSelected, CompareState::MultiSelected)
        );
    }

    #[test]
    fn remove_walks_back_down() {
        let mut list = CompareList::new();
        for id in [1, 2, 3] {
            list.add(builtin(id));
        }

        let outcome = list.remove(ProductId(2));
        assert_eq!(
            (outcome.from, outcome.to),
            (CompareState::MultiSelected, CompareState::MultiSelected)
        );

        let outcome = list.remove(ProductId(1));
        assert_eq!(
            (outcome.from, outcome.to),
            (CompareState::MultiSelected, CompareState::SingleSelected)
        );
        assert_eq!(list.single().map(|p| p.id), Some(ProductId(3)));

        let outcome = list.remove(ProductId(3));
        assert_eq!((outcome.from, outcome.to), (CompareState::SingleSelected, CompareState::Idle));
        assert!(list.is_empty());
    }

    #[test]
    fn removing_absent_id_is_a_noop() {
        let mut list = CompareList::new();
        list.add(builtin(5));

        let outcome = list.remove(ProductId(99));

        assert_eq!(outcome.change, CompareChange::NotPresent);
        assert_eq!(ids(&list), vec![5]);
    }

    #[test]
    fn remove_then_add_restores_presence() {
        let mut list = CompareList::new();
        list.add(builtin(1));
        list.add(builtin(3));

        list.remove(ProductId(1));
        assert!(!list.contains(ProductId(1)));

        list.add(builtin(1));
        assert!(list.contains(ProductId(1)));
        assert_eq!(ids(&list), vec![3, 1], "re-added product goes to the end");
    }

    #[test]
    fn table_has_one_row_per_entry_in_insertion_order() {
        let mut list = CompareList::new();
        list.add(builtin(4));
        list.add(builtin(6));

        let table = list.table();

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].name, "MacBook Air M3");
        assert_eq!(table[0].price, 139_999);
        assert_eq!(table[1].name, "Dell XPS 13");
        assert_eq!(table[1].popularity, 92.0);
        assert!(list.single().is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any sequence of adds and removes keeps the list free of
        /// duplicates, in first-added order, with the state matching its size.
        #[test]
        fn edits_never_duplicate_entries(
            edits in prop::collection::vec((any::<bool>(), 1u32..=6), 0..32)
        ) {
            let mut list = CompareList::new();
            let mut expected: Vec<u32> = Vec::new();

            for (is_add, id) in edits {
                let outcome = if is_add {
                    list.add(builtin(id))
                } else {
                    list.remove(ProductId(id))
                };

                let present = expected.contains(&id);
                let change = match (is_add, present) {
                    (true, false) => {
                        expected.push(id);
                        CompareChange::Added
                    }
                    (true, true) => CompareChange::AlreadyPresent,
                    (false, true) => {
                        expected.retain(|existing| *existing != id);
                        CompareChange::Removed
                    }
                    (false, false) => CompareChange::NotPresent,
                };

                prop_assert_eq!(outcome.change, change);
                prop_assert_eq!(outcome.to, CompareState::for_len(expected.len()));
                prop_assert_eq!(ids(&list), expected.clone());
            }
        }
    }
}
