//! Term catalog: one merged [`Node`] per id plus the per-node ancestor paths.
//!
//! A catalog moves through a fixed sequence of states:
//!
//! ```text
//! CatalogBuilder<AcceptingPrimary>    primary records
//!   -> CatalogBuilder<AcceptingSecondary>  secondary records
//!   -> TermCatalog<Merged>            hierarchy / inferred trees attached
//!   -> TermCatalog<Pruned>            frozen, queryable
//! ```
//!
//! Ancestor paths can only be queried on a [`TermCatalog<Pruned>`], and a pruned
//! catalog exposes no way to add or remove nodes.
//!
//! # Example
//!
//! ```
//! use geneset_core::catalog::{CatalogBuilder, PrimaryRecord};
//! use geneset_core::input::HierarchyNode;
//! use geneset_core::model::SourceType;
//!
//! let mut catalog = CatalogBuilder::new(SourceType::Pathway)
//!     .primary([PrimaryRecord::new("R-HSA-1", "Signal Transduction")])
//!     .build();
//! catalog.attach_hierarchy(&[HierarchyNode::new("Signal Transduction")]);
//! assert_eq!(catalog.len(), 1);
//! ```

mod ancestors;
mod entry;
mod hierarchy;
mod inferred;
mod merge;
mod names;

pub use ancestors::AncestorIndex;
pub use entry::{CatalogEntry, PathwayDetails};
pub use hierarchy::HierarchyStats;
pub use inferred::InferredTreeStats;
pub use merge::{
    AcceptingPrimary, AcceptingSecondary, CatalogBuilder, MergeStats, PrimaryRecord, SecondaryRecord,
};
pub use names::NameIndex;

use rustc_hash::{FxHashMap, FxHashSet};
use std::marker::PhantomData;
use tracing::info;

use crate::input::{HierarchyNode, InferredTreeRecord};
use crate::model::{AncestorPath, Node, SourceType};

use hierarchy::HierarchyWalker;

/// Catalog state: records merged, paths may still be attached, not yet pruned.
#[derive(Debug)]
pub struct Merged;

/// Catalog state: pruned and frozen.
#[derive(Debug)]
pub struct Pruned;

/// Merged nodes of one classification source and their ancestor paths.
#[derive(Debug)]
pub struct TermCatalog<S = Merged> {
    pub(crate) source_type: SourceType,
    pub(crate) nodes: FxHashMap<String, Node>,
    pub(crate) ancestors: AncestorIndex,
    pub(crate) stats: MergeStats,
    pub(crate) _state: PhantomData<S>,
}

impl<S> TermCatalog<S> {
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> &MergeStats {
        &self.stats
    }
}

impl TermCatalog<Merged> {
    /// Walk a nested hierarchy document and record one ancestor path per position.
    ///
    /// Display names are resolved against the nodes merged so far. Ids named
    /// explicitly by the hierarchy but unknown to the catalog become partial nodes.
    /// The diagrammed flag of a node repeated in the hierarchy is taken from its
    /// last position.
    pub fn attach_hierarchy(&mut self, roots: &[HierarchyNode]) -> HierarchyStats {
        let names = NameIndex::build(self.nodes.values());
        let walk = HierarchyWalker::new(&names).walk(roots);
        let mut stats = walk.stats;

        for (id, name) in walk.names {
            if !self.nodes.contains_key(&id) {
                self.nodes
                    .insert(id.clone(), Node::new(id, self.source_type).with_name(name));
                stats.partial_nodes += 1;
            }
        }
        for (id, diagrammed) in walk.diagrammed {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.diagrammed = diagrammed;
            }
        }
        stats.duplicate_paths += self.ancestors.extend(walk.index);
        self.stats.partial_nodes += stats.partial_nodes;

        info!(
            source = %self.source_type,
            visited = stats.visited,
            unresolved = stats.unresolved,
            conflicts = stats.flag_conflicts,
            partial = stats.partial_nodes,
            paths = self.ancestors.path_count(),
            "Attached hierarchy"
        );

        stats
    }

    /// Record ancestor paths from reasoner inferred trees.
    ///
    /// May be called once per reasoner output; paths from every call are
    /// unioned, never replaced. Trees about terms the catalog does not hold
    /// (including obsolete terms already excluded) are skipped.
    pub fn attach_inferred_trees<I>(&mut self, trees: I) -> InferredTreeStats
    where
        I: IntoIterator<Item = InferredTreeRecord>,
    {
        let nodes = &self.nodes;
        let conversion = inferred::convert(self.source_type, trees, |id| nodes.contains_key(id));
        let mut stats = conversion.stats;

        for (id, name) in conversion.names {
            if !self.nodes.contains_key(&id) {
                let mut node = Node::new(id.clone(), self.source_type);
                node.display_name = name;
                self.nodes.insert(id, node);
                stats.partial_nodes += 1;
            }
        }
        let duplicates = self.ancestors.extend(conversion.index);
        stats.duplicate_paths += duplicates;
        stats.paths -= duplicates;
        self.stats.partial_nodes += stats.partial_nodes;

        info!(
            source = %self.source_type,
            trees = stats.trees,
            skipped_trees = stats.skipped_trees,
            paths = stats.paths,
            skipped = stats.skipped_ancestors,
            partial = stats.partial_nodes,
            "Attached inferred trees"
        );

        stats
    }

    /// Node ids in the reflexive-transitive ancestor closure of `seeds`.
    pub(crate) fn closure<'a>(&'a self, seeds: impl IntoIterator<Item = &'a str>) -> FxHashSet<&'a str> {
        let mut closure = FxHashSet::default();
        for seed in seeds {
            closure.insert(seed);
            for path in self.ancestors.get(seed) {
                closure.extend(path.ids());
            }
        }
        closure
    }
}

impl TermCatalog<Pruned> {
    /// Every ancestor path of `id`; empty for roots and unplaced nodes.
    pub fn ancestor_paths(&self, id: &str) -> &[AncestorPath] {
        self.ancestors.get(id)
    }

    /// Distinct ancestor ids of `id` across all its paths.
    pub fn ancestor_ids(&self, id: &str) -> FxHashSet<&str> {
        self.ancestors.ancestor_ids(id)
    }

    /// Total number of ancestor paths retained.
    pub fn path_count(&self) -> usize {
        self.ancestors.path_count()
    }

    /// Export the catalog for persistence, sorted by id.
    pub fn entries(&self, source_label: &str, species: Option<&str>) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .nodes
            .values()
            .map(|node| CatalogEntry::from_node(node, self.ancestor_paths(&node.id), source_label, species))
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InferredTreeNode;

    #[test]
    fn test_hierarchy_materializes_partial_node() {
        let mut catalog = CatalogBuilder::new(SourceType::Pathway)
            .primary([PrimaryRecord::new("R-HSA-2", "Child")])
            .build();

        let stats = catalog.attach_hierarchy(&[HierarchyNode::new("Parent")
            .with_id("R-HSA-1")
            .diagrammed(true)
            .with_children(vec![HierarchyNode::new("Child")])]);

        assert_eq!(stats.partial_nodes, 1);
        let parent = catalog.get("R-HSA-1").unwrap();
        assert_eq!(parent.display_name.as_deref(), Some("Parent"));
        assert!(parent.diagrammed);
        assert_eq!(catalog.stats().partial_nodes, 1);
    }

    #[test]
    fn test_inferred_trees_union_across_calls() {
        let mut catalog = CatalogBuilder::new(SourceType::GoTerm)
            .primary([PrimaryRecord::new("GO:0000003", "reproduction")])
            .build();

        let tree = |ancestor: &str| InferredTreeRecord {
            id: "GO:0000003".to_string(),
            ancestors: vec![InferredTreeNode {
                id: ancestor.to_string(),
                name: None,
                relation: None,
                level: 1,
            }],
        };

        catalog.attach_inferred_trees([tree("GO:0008150")]);
        let stats = catalog.attach_inferred_trees([tree("GO:0008150"), tree("GO:0000004")]);

        assert_eq!(stats.duplicate_paths, 1);
        assert_eq!(stats.paths, 1);
        assert_eq!(catalog.ancestors.get("GO:0000003").len(), 2);
        assert!(catalog.contains("GO:0000004"));
    }

    #[test]
    fn test_inferred_trees_never_create_their_subject() {
        let mut obsolete = PrimaryRecord::new("GO:0000005", "obsolete ribosomal chaperone activity");
        obsolete.obsolete = true;
        let mut catalog = CatalogBuilder::new(SourceType::GoTerm)
            .exclude_obsolete(true)
            .primary([PrimaryRecord::new("GO:0008150", "biological_process"), obsolete])
            .build();

        let self_only = |id: &str| InferredTreeRecord {
            id: id.to_string(),
            ancestors: vec![InferredTreeNode {
                id: id.to_string(),
                name: None,
                relation: Some("self".to_string()),
                level: 0,
            }],
        };
        let stats = catalog.attach_inferred_trees([self_only("GO:0000005"), self_only("CHEBI:15377")]);

        assert_eq!(stats.skipped_trees, 2);
        assert_eq!(stats.partial_nodes, 0);
        assert!(!catalog.contains("GO:0000005"));
        assert!(!catalog.contains("CHEBI:15377"));

        let (index, _) = crate::association::AssociationAggregator::aggregate([
            crate::model::Association::positive("U1", "GO:0000005"),
        ]);
        let (catalog, report) = catalog.prune(&index);
        assert!(catalog.is_empty());
        assert_eq!(report.unknown_used, 1);
    }

    #[test]
    fn test_closure_includes_seeds_and_ancestors() {
        let mut catalog = CatalogBuilder::new(SourceType::Pathway)
            .primary([
                PrimaryRecord::new("A", "Alpha"),
                PrimaryRecord::new("B", "Beta"),
                PrimaryRecord::new("C", "Gamma"),
            ])
            .build();
        catalog.attach_hierarchy(&[HierarchyNode::new("Alpha")
            .with_children(vec![HierarchyNode::new("Beta").with_children(vec![HierarchyNode::new("Gamma")])])]);

        let closure = catalog.closure(["C"]);
        assert_eq!(closure.len(), 3);
        assert!(catalog.closure(["A"]).contains("A"));
        assert_eq!(catalog.closure(["A"]).len(), 1);
    }
}
