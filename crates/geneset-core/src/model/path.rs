//! Ancestor paths through a hierarchy.

use serde::{Deserialize, Serialize};

/// A reference to one ancestor node inside an [`AncestorPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathSegment {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Relation between the descendant and this ancestor (`is_a`, `part_of`, ...), when the
    /// path came from a reasoner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

impl PathSegment {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            relation: None,
        }
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }
}

/// One concrete chain of ancestors from a root down to, but excluding, the node it belongs to.
///
/// A node placed at several positions of a hierarchy owns one path per position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AncestorPath {
    segments: Vec<PathSegment>,
}

impl AncestorPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Ancestor ids, root first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.segments.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for a root node's path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<PathSegment> for AncestorPath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
