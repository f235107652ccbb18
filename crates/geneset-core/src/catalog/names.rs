//! Display name to id resolution.

use rustc_hash::FxHashMap;

use crate::model::Node;

/// Bijection between display names and node ids, built once from merged nodes.
///
/// When two nodes share a display name the lexicographically smallest id keeps it;
/// the collision is counted in [`NameIndex::ambiguous`].
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_name: FxHashMap<String, String>,
    ambiguous: usize,
}

impl NameIndex {
    pub fn build<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut named: Vec<(&str, &str)> = nodes
            .into_iter()
            .filter_map(|n| n.display_name.as_deref().map(|name| (name, n.id.as_str())))
            .collect();
        named.sort_unstable_by(|a, b| a.1.cmp(b.1));

        let mut index = Self::default();
        for (name, id) in named {
            if index.by_name.contains_key(name) {
                index.ambiguous += 1;
                continue;
            }
            index.by_name.insert(name.to_string(), id.to_string());
        }
        index
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Number of names claimed by more than one node.
    pub fn ambiguous(&self) -> usize {
        self.ambiguous
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceType;

    #[test]
    fn test_smallest_id_wins_ambiguous_name() {
        let nodes = vec![
            Node::new("R-HSA-2", SourceType::Pathway).with_name("Apoptosis"),
            Node::new("R-HSA-1", SourceType::Pathway).with_name("Apoptosis"),
            Node::new("R-HSA-3", SourceType::Pathway),
        ];
        let index = NameIndex::build(&nodes);

        assert_eq!(index.resolve("Apoptosis"), Some("R-HSA-1"));
        assert_eq!(index.ambiguous(), 1);
        assert_eq!(index.len(), 1);
    }
}
