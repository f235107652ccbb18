//! Aggregation of raw associations into a membership index.
//!
//! Negated evidence never propagates: a `(product, node)` pair with any NEGATIVE
//! row is absent from the index even when POSITIVE rows for the pair exist.

mod index;

pub use index::MembershipIndex;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

use crate::model::{Association, Polarity};

/// Counters gathered while aggregating associations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    /// Distinct positive pairs removed because the same pair was also negated.
    pub suppressed: usize,
    /// Distinct `(product, node)` pairs in the resulting index.
    pub aggregated: usize,
}

/// Splits associations by polarity and collapses positive ones into a [`MembershipIndex`].
#[derive(Debug, Default)]
pub struct AssociationAggregator {
    positive: FxHashMap<(String, String), BTreeSet<String>>,
    negative: FxHashSet<(String, String)>,
    stats: AggregationStats,
}

impl AssociationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a complete association collection in one call.
    pub fn aggregate<I>(associations: I) -> (MembershipIndex, AggregationStats)
    where
        I: IntoIterator<Item = Association>,
    {
        let mut aggregator = Self::new();
        aggregator.extend(associations);
        aggregator.finish()
    }

    /// Add associations. Order is irrelevant.
    pub fn extend<I>(&mut self, associations: I)
    where
        I: IntoIterator<Item = Association>,
    {
        for association in associations {
            self.add(association);
        }
    }

    pub fn add(&mut self, association: Association) {
        self.stats.total += 1;
        let key = (association.product_id, association.node_id);

        match association.polarity {
            Polarity::Positive => {
                self.stats.positive += 1;
                self.positive
                    .entry(key)
                    .or_default()
                    .extend(association.qualifiers);
            }
            Polarity::Negative => {
                self.stats.negative += 1;
                self.negative.insert(key);
            }
        }
    }

    /// Build the index, dropping every positive pair that was also negated.
    pub fn finish(self) -> (MembershipIndex, AggregationStats) {
        let mut stats = self.stats;
        let mut index = MembershipIndex::default();

        for ((product_id, node_id), qualifiers) in self.positive {
            if self.negative.contains(&(product_id.clone(), node_id.clone())) {
                stats.suppressed += 1;
                continue;
            }
            index.insert(product_id, node_id, qualifiers);
        }
        stats.aggregated = index.pair_count();

        info!(
            total = stats.total,
            positive = stats.positive,
            negative = stats.negative,
            suppressed = stats.suppressed,
            aggregated = stats.aggregated,
            products = index.len(),
            "Aggregated associations"
        );

        (index, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let (index, stats) = AssociationAggregator::aggregate([
            Association::positive("U1", "C"),
            Association::positive("U1", "C"),
            Association::positive("U1", "B"),
            Association::positive("U2", "C"),
        ]);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.aggregated, 3);
        assert_eq!(index.nodes("U1").count(), 2);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_negation_suppresses_positive_pair() {
        let (index, stats) = AssociationAggregator::aggregate([
            Association::positive("U1", "C"),
            Association::negative("U1", "C"),
            Association::positive("U1", "B"),
            Association::negative("U2", "B"),
        ]);

        assert!(!index.contains("U1", "C"));
        assert!(index.contains("U1", "B"));
        assert!(!index.contains("U2", "B"));
        assert_eq!(stats.negative, 2);
        assert_eq!(stats.suppressed, 1);
        assert_eq!(stats.aggregated, 1);
    }

    #[test]
    fn test_qualifiers_union_per_pair() {
        let (index, _) = AssociationAggregator::aggregate([
            Association::from_qualifier("U1", "GO:0005634", Some("colocalizes_with")),
            Association::from_qualifier("U1", "GO:0005634", Some("contributes_to")),
            Association::from_qualifier("U1", "GO:0005634", None),
        ]);

        let qualifiers: Vec<_> = index.qualifiers("U1", "GO:0005634").unwrap().iter().cloned().collect();
        assert_eq!(qualifiers, vec!["colocalizes_with", "contributes_to"]);
    }
}
