use std::collections::BTreeMap;

use crate::catalog::CatalogEntry;
use crate::model::{GeneAnnotations, SourceType};
use crate::pipeline::RunReport;

use super::error::StorageError;
use super::GeneSetWriter;

/// Writer that keeps every result in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub catalogs: BTreeMap<SourceType, Vec<CatalogEntry>>,
    pub genes: Vec<GeneAnnotations>,
    pub report: Option<RunReport>,
    pub finished: bool,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self, source: SourceType) -> &[CatalogEntry] {
        self.catalogs.get(&source).map(Vec::as_slice).unwrap_or_default()
    }

    /// Annotations written for `gene_id`, if the gene was written.
    pub fn gene(&self, gene_id: &str) -> Option<&GeneAnnotations> {
        self.genes.iter().find(|g| g.gene_id == gene_id)
    }
}

impl GeneSetWriter for MemoryWriter {
    fn write_catalog(&mut self, source: SourceType, entries: &[CatalogEntry]) -> Result<(), StorageError> {
        if self.finished {
            return Err(StorageError::Finished);
        }
        self.catalogs.insert(source, entries.to_vec());
        Ok(())
    }

    fn write_gene(&mut self, annotations: &GeneAnnotations) -> Result<(), StorageError> {
        if self.finished {
            return Err(StorageError::Finished);
        }
        self.genes.push(annotations.clone());
        Ok(())
    }

    fn write_report(&mut self, report: &RunReport) -> Result<(), StorageError> {
        if self.finished {
            return Err(StorageError::Finished);
        }
        self.report = Some(report.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), StorageError> {
        self.finished = true;
        Ok(())
    }
}
