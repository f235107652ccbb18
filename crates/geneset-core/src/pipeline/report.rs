//! Serializable run and per-source reports.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::association::{AggregationStats, MembershipIndex};
use crate::catalog::{HierarchyStats, InferredTreeStats, MergeStats};
use crate::model::{CrossReference, Gene, GeneAnnotations, SourceType};
use crate::prune::PruneReport;

/// Overlap between a membership index and the gene universe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Distinct product ids in the membership index.
    pub index_products: usize,
    /// Distinct cross-reference ids across the gene universe.
    pub universe_products: usize,
    /// Ids only the gene universe knows; such genes get no evidence.
    pub universe_only: usize,
    /// Ids only the index knows; their evidence reaches no gene.
    pub index_only: usize,
    pub common: usize,
}

impl CoverageReport {
    pub fn compute(index: &MembershipIndex, genes: &[Gene], kind: CrossReference) -> Self {
        let indexed: FxHashSet<&str> = index.product_ids().collect();
        let universe: FxHashSet<&str> = genes
            .iter()
            .flat_map(|gene| gene.cross_references(kind))
            .collect();
        let common = indexed.intersection(&universe).count();

        Self {
            index_products: indexed.len(),
            universe_products: universe.len(),
            universe_only: universe.len() - common,
            index_only: indexed.len() - common,
            common,
        }
    }
}

/// Everything observed while processing one classification source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source_type: SourceType,
    pub merge: MergeStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<HierarchyStats>,
    /// One entry per reasoner output attached.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inferred: Vec<InferredTreeStats>,
    pub aggregation: AggregationStats,
    pub prune: PruneReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageReport>,
    /// Node ids referenced by associations but missing from the catalog.
    pub unknown_references: usize,
    pub genes_annotated: usize,
    pub direct: usize,
    pub inferred_annotations: usize,
}

impl SourceReport {
    pub(crate) fn new(source_type: SourceType, merge: MergeStats) -> Self {
        Self {
            source_type,
            merge,
            hierarchy: None,
            inferred: Vec::new(),
            aggregation: AggregationStats::default(),
            prune: PruneReport::default(),
            coverage: None,
            unknown_references: 0,
            genes_annotated: 0,
            direct: 0,
            inferred_annotations: 0,
        }
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub sources: Vec<SourceReport>,
    pub genes: usize,
    /// Genes with at least one gene set from any source.
    pub genes_annotated: usize,
    pub direct: usize,
    pub inferred: usize,
}

impl RunReport {
    pub(crate) fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            sources: Vec::new(),
            genes: 0,
            genes_annotated: 0,
            direct: 0,
            inferred: 0,
        }
    }

    pub fn source(&self, source_type: SourceType) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.source_type == source_type)
    }

    /// Fold one gene's annotations into the totals.
    pub(crate) fn record(&mut self, annotations: &GeneAnnotations) {
        self.genes += 1;
        if annotations.is_empty() {
            return;
        }
        self.genes_annotated += 1;

        for source in &mut self.sources {
            let mut seen = false;
            for set in annotations.gene_sets.iter().filter(|s| s.source_type == source.source_type) {
                seen = true;
                if set.is_direct() {
                    source.direct += 1;
                } else {
                    source.inferred_annotations += 1;
                }
            }
            if seen {
                source.genes_annotated += 1;
            }
        }

        let (direct, inferred) = annotations.counts();
        self.direct += direct;
        self.inferred += inferred;
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall time of the run, once finished.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}
