//! Record shapes exchanged with the external readers, and loaders for
//! materialized record files.
//!
//! Raw source formats (OBO, OWL, GAF, Reactome XML) are parsed upstream; this
//! module only accepts their already-extracted records as JSON, JSON-lines or
//! YAML documents.

mod error;
mod loader;
mod records;

pub use error::InputError;
pub use loader::{load_records, RecordFormat};
pub use records::{
    AssociationRow, CuratedGeneRecord, GoTermRecord, HierarchyNode, InferredTreeNode,
    InferredTreeRecord, PathwaySummationRecord, PathwayUniprotRecord,
};
