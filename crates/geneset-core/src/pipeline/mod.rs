//! End-to-end run over every configured source.
//!
//! Each source is merged, aggregated and pruned on its own. Only once every
//! catalog and index is frozen are the catalogs written and the gene universe
//! streamed through the builders, in chunks computed in parallel and written
//! in input order.

mod report;
mod source;

pub use report::{CoverageReport, RunReport, SourceReport};
pub use source::{PreparedSource, SourceInput};

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

use crate::builder::GeneGeneSetBuilder;
use crate::config::{ConfigError, PipelineConfig};
use crate::input::InputError;
use crate::model::{Gene, GeneAnnotations, SourceType};
use crate::storage::{GeneSetWriter, StorageError};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Source {0} given more than once")]
    DuplicateSource(SourceType),
}

/// Runs sources through the engine and hands results to a writer.
pub struct Pipeline<W: GeneSetWriter> {
    writer: W,
    settings: PipelineConfig,
}

impl<W: GeneSetWriter> Pipeline<W> {
    /// Creates a pipeline with default settings.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            settings: PipelineConfig::default(),
        }
    }

    pub fn with_settings(mut self, settings: PipelineConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Run every source over the gene universe.
    pub fn run(&mut self, sources: Vec<SourceInput>, genes: &[Gene]) -> Result<RunReport, PipelineError> {
        self.run_with_progress(sources, genes, |_| {})
    }

    /// Like [`Pipeline::run`], calling `progress` with the number of genes
    /// written after each chunk.
    pub fn run_with_progress<F>(
        &mut self,
        sources: Vec<SourceInput>,
        genes: &[Gene],
        mut progress: F,
    ) -> Result<RunReport, PipelineError>
    where
        F: FnMut(usize),
    {
        let start = Instant::now();
        let mut report = RunReport::start();

        let mut seen = FxHashSet::default();
        for source in &sources {
            if !seen.insert(source.source_type) {
                return Err(PipelineError::DuplicateSource(source.source_type));
            }
        }

        info!(run_id = %report.run_id, sources = sources.len(), genes = genes.len(), "Starting run");

        let mut prepared: Vec<PreparedSource> = sources.into_iter().map(SourceInput::prepare).collect();
        for source in &mut prepared {
            source.measure_coverage(genes);
        }
        report.sources = prepared.iter().map(|s| s.report.clone()).collect();

        for source in &prepared {
            self.writer.write_catalog(source.source_type(), &source.entries())?;
        }

        let builders: Vec<GeneGeneSetBuilder<'_>> = prepared.iter().map(PreparedSource::builder).collect();
        let pool = self.thread_pool()?;
        let parallel = self.settings.parallel;
        let chunk_size = self.settings.progress_interval.max(1);
        let mut written = 0;

        for chunk in genes.chunks(chunk_size) {
            let annotations = match &pool {
                Some(pool) => pool.install(|| annotate_chunk(&builders, chunk, parallel)),
                None => annotate_chunk(&builders, chunk, parallel),
            };

            for gene in &annotations {
                self.writer.write_gene(gene)?;
                report.record(gene);
            }
            written += annotations.len();
            progress(written);
            info!(processed = written, total = genes.len(), "Processed genes");
        }

        report.finish();
        self.writer.write_report(&report)?;
        self.writer.finish()?;

        info!(
            run_id = %report.run_id,
            genes = report.genes,
            annotated = report.genes_annotated,
            direct = report.direct,
            inferred = report.inferred,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Run complete"
        );

        Ok(report)
    }

    fn thread_pool(&self) -> Result<Option<rayon::ThreadPool>, PipelineError> {
        if !self.settings.parallel || self.settings.threads == 0 {
            return Ok(None);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.settings.threads)
            .build()?;
        Ok(Some(pool))
    }
}

fn annotate_chunk(builders: &[GeneGeneSetBuilder<'_>], genes: &[Gene], parallel: bool) -> Vec<GeneAnnotations> {
    if parallel {
        genes.par_iter().map(|gene| annotate(builders, gene)).collect()
    } else {
        genes.iter().map(|gene| annotate(builders, gene)).collect()
    }
}

/// Gene sets of `gene` across every source, grouped by source in builder order.
pub fn annotate(builders: &[GeneGeneSetBuilder<'_>], gene: &Gene) -> GeneAnnotations {
    let gene_sets: Vec<_> = builders.iter().flat_map(|builder| builder.build(gene)).collect();
    debug!(gene = %gene.id, sets = gene_sets.len(), "Annotated gene");

    GeneAnnotations {
        gene_id: gene.id.clone(),
        gene_sets,
    }
}
