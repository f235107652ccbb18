//! Data models shared by every stage of the annotation pipeline.

mod association;
mod gene;
mod node;
mod path;

pub use association::{Association, Polarity, NEGATION_QUALIFIER};
pub use gene::{Annotation, CrossReference, Gene, GeneAnnotations, GeneGeneSet};
pub use node::{is_go_id, Node, SourceType};
pub use path::{AncestorPath, PathSegment};
