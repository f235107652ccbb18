//! Depth-first walk over a nested hierarchy document.
//!
//! Every visited node receives a snapshot of the ancestor stack as one of its
//! [`AncestorPath`]s; a node placed at several positions collects several paths.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AncestorIndex, NameIndex};
use crate::input::HierarchyNode;
use crate::model::{AncestorPath, PathSegment};

/// Counters gathered while walking a hierarchy document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyStats {
    /// Hierarchy positions resolved to a node id.
    pub visited: usize,
    /// Positions whose display name matched no node.
    pub unresolved: usize,
    /// Positions that repeated an existing path for the same node.
    pub duplicate_paths: usize,
    /// Nodes whose diagrammed flag differed between positions.
    pub flag_conflicts: usize,
    /// Display names shared by more than one node.
    pub ambiguous_names: usize,
    /// Nodes referenced by the hierarchy but absent from the merged records.
    pub partial_nodes: usize,
}

/// Result of walking a hierarchy, applied to the catalog by the caller.
#[derive(Debug, Default)]
pub(crate) struct HierarchyWalk {
    pub index: AncestorIndex,
    /// Last-seen diagrammed flag per node id.
    pub diagrammed: FxHashMap<String, bool>,
    /// Display name of each resolved id as written in the hierarchy.
    pub names: FxHashMap<String, String>,
    pub stats: HierarchyStats,
}

pub(crate) struct HierarchyWalker<'a> {
    names: &'a NameIndex,
    stack: Vec<PathSegment>,
    walk: HierarchyWalk,
}

impl<'a> HierarchyWalker<'a> {
    pub fn new(names: &'a NameIndex) -> Self {
        let mut walk = HierarchyWalk::default();
        walk.stats.ambiguous_names = names.ambiguous();
        Self {
            names,
            stack: Vec::new(),
            walk,
        }
    }

    pub fn walk(mut self, roots: &[HierarchyNode]) -> HierarchyWalk {
        for root in roots {
            self.visit(root);
        }
        self.walk
    }

    fn resolve(&self, node: &HierarchyNode) -> Option<String> {
        node.id
            .clone()
            .or_else(|| self.names.resolve(&node.display_name).map(str::to_string))
    }

    fn visit(&mut self, node: &HierarchyNode) {
        let Some(id) = self.resolve(node) else {
            // Descendants keep the resolvable part of the stack.
            self.walk.stats.unresolved += 1;
            debug!(name = %node.display_name, "Unresolved hierarchy entry");
            for child in &node.children {
                self.visit(child);
            }
            return;
        };

        self.walk.stats.visited += 1;

        let path = AncestorPath::new(self.stack.clone());
        if !self.walk.index.insert(&id, path) {
            self.walk.stats.duplicate_paths += 1;
        }

        if let Some(previous) = self.walk.diagrammed.insert(id.clone(), node.diagrammed) {
            if previous != node.diagrammed {
                self.walk.stats.flag_conflicts += 1;
                debug!(%id, "Conflicting diagrammed flag, last position wins");
            }
        }
        self.walk
            .names
            .entry(id.clone())
            .or_insert_with(|| node.display_name.clone());

        self.stack
            .push(PathSegment::new(id, Some(node.display_name.clone())));
        for child in &node.children {
            self.visit(child);
        }
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, SourceType};

    fn names(pairs: &[(&str, &str)]) -> NameIndex {
        let nodes: Vec<Node> = pairs
            .iter()
            .map(|(id, name)| Node::new(*id, SourceType::Pathway).with_name(*name))
            .collect();
        NameIndex::build(&nodes)
    }

    #[test]
    fn test_repeated_node_collects_every_path() {
        let index = names(&[("A", "Alpha"), ("B", "Beta"), ("C", "Gamma")]);
        let roots = vec![
            HierarchyNode::new("Alpha").with_children(vec![HierarchyNode::new("Gamma")]),
            HierarchyNode::new("Beta").with_children(vec![HierarchyNode::new("Gamma")]),
        ];

        let walk = HierarchyWalker::new(&index).walk(&roots);
        let paths = walk.index.get("C");
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].ids().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(paths[1].ids().collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(walk.stats.visited, 4);
    }

    #[test]
    fn test_path_excludes_node_itself() {
        let index = names(&[("A", "Alpha"), ("B", "Beta")]);
        let roots = vec![HierarchyNode::new("Alpha").with_children(vec![HierarchyNode::new("Beta")])];

        let walk = HierarchyWalker::new(&index).walk(&roots);
        assert!(walk.index.get("A")[0].is_empty());
        assert!(!walk.index.get("B")[0].contains("B"));
    }

    #[test]
    fn test_unresolved_entry_is_skipped_not_fatal() {
        let index = names(&[("A", "Alpha"), ("C", "Gamma")]);
        let roots = vec![HierarchyNode::new("Alpha").with_children(vec![
            HierarchyNode::new("Unknown").with_children(vec![HierarchyNode::new("Gamma")]),
        ])];

        let walk = HierarchyWalker::new(&index).walk(&roots);
        assert_eq!(walk.stats.unresolved, 1);
        assert_eq!(walk.index.get("C")[0].ids().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn test_diagrammed_last_write_wins() {
        let index = names(&[("A", "Alpha"), ("B", "Beta"), ("C", "Gamma")]);
        let roots = vec![
            HierarchyNode::new("Alpha").with_children(vec![HierarchyNode::new("Gamma").diagrammed(true)]),
            HierarchyNode::new("Beta").with_children(vec![HierarchyNode::new("Gamma").diagrammed(false)]),
        ];

        let walk = HierarchyWalker::new(&index).walk(&roots);
        assert_eq!(walk.diagrammed.get("C"), Some(&false));
        assert_eq!(walk.stats.flag_conflicts, 1);
    }

    #[test]
    fn test_explicit_id_bypasses_name_lookup() {
        let index = NameIndex::default();
        let roots = vec![HierarchyNode::new("Alpha")
            .with_id("R-HSA-1")
            .with_children(vec![HierarchyNode::new("Beta").with_id("R-HSA-2")])];

        let walk = HierarchyWalker::new(&index).walk(&roots);
        assert_eq!(walk.index.get("R-HSA-2")[0].ids().collect::<Vec<_>>(), vec!["R-HSA-1"]);
        assert_eq!(walk.names.get("R-HSA-2").map(String::as_str), Some("Beta"));
    }
}
