use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::CatalogEntry;
use crate::config::{OutputConfig, DEFAULT_GENE_FILE, DEFAULT_REPORT_FILE};
use crate::model::{GeneAnnotations, SourceType};
use crate::pipeline::RunReport;

use super::error::StorageError;
use super::GeneSetWriter;

/// JSON file writer.
///
/// Lays results out in one directory:
/// ```text
/// <out>/
///   catalog-go_term.json        # Retained catalog per source
///   catalog-pathway.json
///   catalog-curated_set.json
///   gene-gene-sets.jsonl        # One GeneAnnotations per line
///   report.json                 # Run report
/// ```
pub struct JsonFileWriter {
    dir: PathBuf,
    pretty: bool,
    genes: Option<BufWriter<File>>,
    genes_written: usize,
    finished: bool,
}

impl JsonFileWriter {
    /// Creates a writer rooted at `dir`, compact JSON.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: false,
            genes: None,
            genes_written: 0,
            finished: false,
        }
    }

    /// Creates a writer from the output configuration.
    pub fn with_config(config: &OutputConfig) -> Self {
        Self::new(&config.dir).pretty(config.pretty)
    }

    /// Pretty-print catalog and report files.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of a source's catalog file.
    pub fn catalog_path(&self, source: SourceType) -> PathBuf {
        self.dir.join(format!("catalog-{}.json", source.slug()))
    }

    /// Returns the path of the per-gene results file.
    pub fn genes_path(&self) -> PathBuf {
        self.dir.join(DEFAULT_GENE_FILE)
    }

    /// Returns the path of the run report.
    pub fn report_path(&self) -> PathBuf {
        self.dir.join(DEFAULT_REPORT_FILE)
    }

    /// Number of gene lines written so far.
    pub fn genes_written(&self) -> usize {
        self.genes_written
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(StorageError::InvalidDirectory(self.dir.clone()));
        }
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.finished {
            return Err(StorageError::Finished);
        }
        Ok(())
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String, StorageError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    fn genes_file(&mut self) -> Result<&mut BufWriter<File>, StorageError> {
        if self.genes.is_none() {
            self.ensure_dir()?;
            let path = self.genes_path();
            let file = File::create(&path).map_err(|e| StorageError::io(&path, e))?;
            self.genes = Some(BufWriter::new(file));
        }
        self.genes.as_mut().ok_or(StorageError::Finished)
    }
}

impl GeneSetWriter for JsonFileWriter {
    fn write_catalog(&mut self, source: SourceType, entries: &[CatalogEntry]) -> Result<(), StorageError> {
        self.ensure_open()?;
        self.ensure_dir()?;

        let path = self.catalog_path(source);
        let json = self.to_json(&entries)?;
        fs::write(&path, json).map_err(|e| StorageError::io(&path, e))?;

        info!(source = %source, entries = entries.len(), path = %path.display(), "Wrote catalog");
        Ok(())
    }

    fn write_gene(&mut self, annotations: &GeneAnnotations) -> Result<(), StorageError> {
        self.ensure_open()?;
        let line = serde_json::to_string(annotations)?;
        let path = self.genes_path();

        let writer = self.genes_file()?;
        writeln!(writer, "{line}").map_err(|e| StorageError::io(&path, e))?;
        self.genes_written += 1;
        Ok(())
    }

    fn write_report(&mut self, report: &RunReport) -> Result<(), StorageError> {
        self.ensure_open()?;
        self.ensure_dir()?;

        let path = self.report_path();
        let json = self.to_json(report)?;
        fs::write(&path, json).map_err(|e| StorageError::io(&path, e))?;

        debug!(path = %path.display(), "Wrote run report");
        Ok(())
    }

    fn finish(&mut self) -> Result<(), StorageError> {
        if self.finished {
            return Ok(());
        }
        // The results file exists even when no gene was written.
        self.genes_file()?;
        if let Some(mut writer) = self.genes.take() {
            writer.flush().map_err(|e| StorageError::io(self.genes_path(), e))?;
        }
        self.finished = true;

        info!(genes = self.genes_written, dir = %self.dir.display(), "Finished writing results");
        Ok(())
    }
}
