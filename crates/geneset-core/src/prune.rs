//! Pruning of catalog nodes unreachable from observed evidence.
//!
//! `used` is every node with at least one member; the retained set is
//! `catalog ∩ (used ∪ ancestors(used))`. Pruning consumes the merged catalog and
//! returns it frozen, so it happens exactly once.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::time::Instant;
use tracing::info;

use crate::association::MembershipIndex;
use crate::catalog::{Merged, Pruned, TermCatalog};

/// Outcome of pruning one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneReport {
    pub nodes_before: usize,
    pub nodes_after: usize,
    /// Distinct nodes with direct evidence.
    pub used: usize,
    /// Size of `used ∪ ancestors(used)`, including ids the catalog never held.
    pub closure: usize,
    /// Used node ids with no catalog node.
    pub unknown_used: usize,
}

impl PruneReport {
    pub fn removed(&self) -> usize {
        self.nodes_before - self.nodes_after
    }
}

pub struct Pruner;

impl Pruner {
    /// Keep only nodes reachable from `index`, and freeze the catalog.
    pub fn prune(catalog: TermCatalog<Merged>, index: &MembershipIndex) -> (TermCatalog<Pruned>, PruneReport) {
        let start = Instant::now();
        let used = index.used_nodes();

        let (retained, report) = {
            let closure = catalog.closure(used.iter().copied());
            let retained: FxHashSet<String> = catalog
                .node_ids()
                .filter(|id| closure.contains(id))
                .map(str::to_string)
                .collect();

            let report = PruneReport {
                nodes_before: catalog.len(),
                nodes_after: retained.len(),
                used: used.len(),
                closure: closure.len(),
                unknown_used: used.iter().filter(|id| !catalog.contains(id)).count(),
            };
            (retained, report)
        };

        let TermCatalog {
            source_type,
            mut nodes,
            mut ancestors,
            stats,
            ..
        } = catalog;

        nodes.retain(|id, _| retained.contains(id));
        ancestors.retain_nodes(|id| retained.contains(id));
        ancestors.sort();

        info!(
            source = %source_type,
            before = report.nodes_before,
            after = report.nodes_after,
            used = report.used,
            unknown = report.unknown_used,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Pruned catalog"
        );

        let pruned = TermCatalog {
            source_type,
            nodes,
            ancestors,
            stats,
            _state: PhantomData,
        };
        (pruned, report)
    }
}

impl TermCatalog<Merged> {
    /// Shorthand for [`Pruner::prune`].
    pub fn prune(self, index: &MembershipIndex) -> (TermCatalog<Pruned>, PruneReport) {
        Pruner::prune(self, index)
    }
}
