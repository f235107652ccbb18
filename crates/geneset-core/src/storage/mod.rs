mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::JsonFileWriter;
pub use memory::MemoryWriter;

use crate::catalog::CatalogEntry;
use crate::model::{GeneAnnotations, SourceType};
use crate::pipeline::RunReport;

/// Trait for result persistence backends.
///
/// The pipeline hands over each pruned catalog once, then every gene's
/// annotations in gene-universe order, then the run report.
pub trait GeneSetWriter {
    /// Persists the retained catalog of one source.
    fn write_catalog(&mut self, source: SourceType, entries: &[CatalogEntry]) -> Result<(), StorageError>;

    /// Persists one gene's annotations.
    fn write_gene(&mut self, annotations: &GeneAnnotations) -> Result<(), StorageError>;

    /// Persists the run report.
    fn write_report(&mut self, report: &RunReport) -> Result<(), StorageError>;

    /// Flushes buffered output.
    fn finish(&mut self) -> Result<(), StorageError>;
}
