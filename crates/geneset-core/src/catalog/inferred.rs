//! Ancestor paths from reasoner inferred trees.
//!
//! A reasoner reports, per term, every ancestor with its longest distance and
//! dominant relation. Each tree becomes one [`AncestorPath`] ordered from the
//! farthest ancestor down to the nearest.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AncestorIndex;
use crate::input::InferredTreeRecord;
use crate::model::{is_go_id, AncestorPath, PathSegment, SourceType};

/// Counters gathered while converting inferred trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredTreeStats {
    pub trees: usize,
    /// Trees whose subject is not a catalog node, or not a GO term in a GO catalog.
    pub skipped_trees: usize,
    pub paths: usize,
    /// Trees repeating a path already recorded by an earlier source.
    pub duplicate_paths: usize,
    /// Ancestors dropped for a negative level or a foreign id.
    pub skipped_ancestors: usize,
    /// Nodes referenced only by a tree, materialized from the tree's fields.
    pub partial_nodes: usize,
}

#[derive(Debug, Default)]
pub(crate) struct InferredConversion {
    pub index: AncestorIndex,
    /// Names of every ancestor seen in a tree, for materializing partial nodes.
    pub names: FxHashMap<String, Option<String>>,
    pub stats: InferredTreeStats,
}

/// Convert trees into ancestor paths.
///
/// Only trees about a node `is_known` accepts are converted; a tree never
/// creates its own subject. For GO catalogs, subjects and ancestors that are not
/// GO terms (cross-ontology classes the reasoner pulled in) are dropped.
pub(crate) fn convert<I, F>(source_type: SourceType, trees: I, is_known: F) -> InferredConversion
where
    I: IntoIterator<Item = InferredTreeRecord>,
    F: Fn(&str) -> bool,
{
    let mut conversion = InferredConversion::default();

    for tree in trees {
        conversion.stats.trees += 1;

        if !is_known(&tree.id) || (source_type == SourceType::GoTerm && !is_go_id(&tree.id)) {
            conversion.stats.skipped_trees += 1;
            debug!(term = %tree.id, "Skipping inferred tree for unknown term");
            continue;
        }

        let mut ancestors = Vec::with_capacity(tree.ancestors.len());
        for ancestor in tree.ancestors {
            if ancestor.id == tree.id {
                continue;
            }
            if ancestor.level < 0 || (source_type == SourceType::GoTerm && !is_go_id(&ancestor.id)) {
                conversion.stats.skipped_ancestors += 1;
                debug!(term = %tree.id, ancestor = %ancestor.id, "Skipping inferred ancestor");
                continue;
            }
            ancestors.push(ancestor);
        }

        ancestors.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| a.id.cmp(&b.id)));

        let path: AncestorPath = ancestors
            .into_iter()
            .map(|a| {
                conversion
                    .names
                    .entry(a.id.clone())
                    .or_insert_with(|| a.name.clone());
                let segment = PathSegment::new(a.id, a.name);
                match a.relation {
                    Some(relation) => segment.with_relation(relation),
                    None => segment,
                }
            })
            .collect();

        if conversion.index.insert(&tree.id, path) {
            conversion.stats.paths += 1;
        } else {
            conversion.stats.duplicate_paths += 1;
        }
    }

    conversion
}
