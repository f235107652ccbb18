//! Reverse index from node id to the set of its ancestor paths.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::AncestorPath;

/// Multimap `node id -> {AncestorPath}`.
///
/// Paths are kept with set semantics: inserting a path the node already owns is a no-op,
/// so a DAG encoded as a forest with repeats never duplicates a path.
#[derive(Debug, Clone, Default)]
pub struct AncestorIndex {
    paths: FxHashMap<String, Vec<AncestorPath>>,
}

impl AncestorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` for `id`. Returns `false` when the path was already present.
    pub fn insert(&mut self, id: &str, path: AncestorPath) -> bool {
        let paths = self.paths.entry(id.to_string()).or_default();
        if paths.contains(&path) {
            return false;
        }
        paths.push(path);
        true
    }

    /// Union `other` into this index. Returns the number of paths that were already present.
    pub fn extend(&mut self, other: AncestorIndex) -> usize {
        let mut duplicates = 0;
        for (id, paths) in other.paths {
            for path in paths {
                if !self.insert(&id, path) {
                    duplicates += 1;
                }
            }
        }
        duplicates
    }

    /// Paths recorded for `id`; empty when the node was never placed in a hierarchy.
    pub fn get(&self, id: &str) -> &[AncestorPath] {
        self.paths.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct ancestor ids of `id` across all of its paths.
    pub fn ancestor_ids(&self, id: &str) -> FxHashSet<&str> {
        self.get(id).iter().flat_map(|path| path.ids()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.paths.contains_key(id)
    }

    /// Number of nodes with at least one recorded path.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Total number of paths across every node.
    pub fn path_count(&self) -> usize {
        self.paths.values().map(Vec::len).sum()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Drop every node for which `keep` is false.
    pub(crate) fn retain_nodes(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.paths.retain(|id, _| keep(id));
    }

    /// Sort each node's paths so exports are deterministic.
    pub(crate) fn sort(&mut self) {
        for paths in self.paths.values_mut() {
            paths.sort();
        }
    }
}
