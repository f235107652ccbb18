pub mod association;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod prune;
pub mod storage;

pub use association::{AssociationAggregator, MembershipIndex};
pub use builder::GeneGeneSetBuilder;
pub use catalog::{CatalogBuilder, Merged, Pruned, TermCatalog};
pub use config::Config;
pub use model::{Annotation, Association, Gene, GeneAnnotations, GeneGeneSet, Node, SourceType};
pub use pipeline::{Pipeline, PipelineError, RunReport, SourceInput};
pub use prune::{PruneReport, Pruner};
pub use storage::{GeneSetWriter, JsonFileWriter, MemoryWriter};
