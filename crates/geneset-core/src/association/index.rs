//! Product to node membership index.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;

/// `product id -> {node id}` for positive, non-negated associations.
///
/// Each pair keeps the union of its association qualifiers.
#[derive(Debug, Clone, Default)]
pub struct MembershipIndex {
    by_product: FxHashMap<String, FxHashMap<String, BTreeSet<String>>>,
}

impl MembershipIndex {
    pub(crate) fn insert(&mut self, product_id: String, node_id: String, qualifiers: BTreeSet<String>) {
        self.by_product
            .entry(product_id)
            .or_default()
            .entry(node_id)
            .or_default()
            .extend(qualifiers);
    }

    /// Nodes the product is a member of. Iteration order is unspecified.
    pub fn nodes(&self, product_id: &str) -> impl Iterator<Item = &str> {
        self.by_product
            .get(product_id)
            .into_iter()
            .flat_map(|nodes| nodes.keys().map(String::as_str))
    }

    pub fn contains(&self, product_id: &str, node_id: &str) -> bool {
        self.by_product
            .get(product_id)
            .is_some_and(|nodes| nodes.contains_key(node_id))
    }

    /// Qualifiers recorded for the pair, or `None` when the pair is absent.
    pub fn qualifiers(&self, product_id: &str, node_id: &str) -> Option<&BTreeSet<String>> {
        self.by_product.get(product_id)?.get(node_id)
    }

    /// Every node with at least one member: the union of all index values.
    pub fn used_nodes(&self) -> FxHashSet<&str> {
        self.by_product
            .values()
            .flat_map(|nodes| nodes.keys().map(String::as_str))
            .collect()
    }

    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.by_product.keys().map(String::as_str)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.by_product.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_product.is_empty()
    }

    /// Number of distinct `(product, node)` pairs.
    pub fn pair_count(&self) -> usize {
        self.by_product.values().map(FxHashMap::len).sum()
    }
}
