//! Per-source inputs and their preparation into frozen catalog/index pairs.

use tracing::{info, warn};

use crate::association::{AssociationAggregator, MembershipIndex};
use crate::builder::GeneGeneSetBuilder;
use crate::catalog::{CatalogBuilder, CatalogEntry, PrimaryRecord, Pruned, SecondaryRecord, TermCatalog};
use crate::config::{CuratedConfig, GoConfig, PathwayConfig};
use crate::input::{
    AssociationRow, CuratedGeneRecord, GoTermRecord, HierarchyNode, InferredTreeRecord,
    PathwaySummationRecord, PathwayUniprotRecord,
};
use crate::model::{Association, CrossReference, Gene, SourceType};

use super::report::{CoverageReport, SourceReport};

/// Every materialized record collection of one classification source.
#[derive(Debug, Clone)]
pub struct SourceInput {
    pub source_type: SourceType,
    /// Provider label written on catalog entries.
    pub source_label: String,
    pub species: Option<String>,
    pub cross_reference: CrossReference,
    pub exclude_obsolete: bool,
    pub primary: Vec<PrimaryRecord>,
    /// Secondary records also contribute their members as positive associations.
    pub secondary: Vec<SecondaryRecord>,
    pub hierarchy: Vec<HierarchyNode>,
    /// One collection per reasoner output.
    pub inferred_trees: Vec<Vec<InferredTreeRecord>>,
    pub associations: Vec<Association>,
}

impl SourceInput {
    pub fn new(source_type: SourceType, source_label: impl Into<String>) -> Self {
        Self {
            source_type,
            source_label: source_label.into(),
            species: None,
            cross_reference: CrossReference::Uniprot,
            exclude_obsolete: false,
            primary: Vec::new(),
            secondary: Vec::new(),
            hierarchy: Vec::new(),
            inferred_trees: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Gene Ontology: terms, GAF association rows and reasoner trees.
    pub fn go(
        config: &GoConfig,
        terms: Vec<GoTermRecord>,
        associations: Vec<AssociationRow>,
        inferred_trees: Vec<Vec<InferredTreeRecord>>,
    ) -> Self {
        let mut input = Self::new(SourceType::GoTerm, &config.source_label);
        input.exclude_obsolete = config.exclude_obsolete;
        input.primary = terms.into_iter().map(PrimaryRecord::from).collect();
        input.associations = associations.into_iter().map(Association::from).collect();
        input.inferred_trees = inferred_trees;
        input
    }

    /// Reactome: summations, UniProt membership lists and the pathway hierarchy.
    pub fn pathway(
        config: &PathwayConfig,
        summations: Vec<PathwaySummationRecord>,
        uniprots: Vec<PathwayUniprotRecord>,
        hierarchy: Vec<HierarchyNode>,
    ) -> Self {
        let mut input = Self::new(SourceType::Pathway, &config.source_label);
        input.species = Some(config.species.clone());
        input.primary = summations.into_iter().map(PrimaryRecord::from).collect();
        input.secondary = uniprots.into_iter().map(SecondaryRecord::from).collect();
        input.hierarchy = hierarchy;
        input
    }

    /// A curated list: one node whose members are gene symbols.
    pub fn curated(config: &CuratedConfig, genes: Vec<CuratedGeneRecord>) -> Self {
        let mut input = Self::new(SourceType::CuratedSet, &config.source_label);
        input.cross_reference = CrossReference::Symbol;

        let mut record = PrimaryRecord::new(&config.id, &config.name);
        record.description = Some(config.description.clone()).filter(|d| !d.is_empty());
        input.primary = vec![record];
        input.associations = genes
            .into_iter()
            .map(|gene| Association::positive(gene.symbol, config.id.clone()))
            .collect();
        input
    }

    /// Merge, attach paths, aggregate and prune.
    pub fn prepare(self) -> PreparedSource {
        let SourceInput {
            source_type,
            source_label,
            species,
            cross_reference,
            exclude_obsolete,
            primary,
            secondary,
            hierarchy,
            inferred_trees,
            mut associations,
        } = self;

        associations.extend(secondary.iter().flat_map(|record| record.associations()));

        let mut catalog = CatalogBuilder::new(source_type)
            .exclude_obsolete(exclude_obsolete)
            .primary(primary)
            .secondary(secondary)
            .build();

        let hierarchy = (!hierarchy.is_empty()).then(|| catalog.attach_hierarchy(&hierarchy));
        let inferred: Vec<_> = inferred_trees
            .into_iter()
            .map(|trees| catalog.attach_inferred_trees(trees))
            .collect();

        let (index, aggregation) = AssociationAggregator::aggregate(associations);
        let merge = catalog.stats().clone();
        let (catalog, prune) = catalog.prune(&index);

        if prune.unknown_used > 0 {
            warn!(
                source = %source_type,
                unknown = prune.unknown_used,
                "Associations reference nodes missing from the catalog"
            );
        }

        let mut report = SourceReport::new(source_type, merge);
        report.hierarchy = hierarchy;
        report.inferred = inferred;
        report.aggregation = aggregation;
        report.unknown_references = prune.unknown_used;
        report.prune = prune;

        PreparedSource {
            catalog,
            index,
            source_label,
            species,
            cross_reference,
            report,
        }
    }
}

/// A frozen catalog and membership index, ready to annotate genes.
#[derive(Debug)]
pub struct PreparedSource {
    pub catalog: TermCatalog<Pruned>,
    pub index: MembershipIndex,
    pub source_label: String,
    pub species: Option<String>,
    pub cross_reference: CrossReference,
    pub report: SourceReport,
}

impl PreparedSource {
    pub fn source_type(&self) -> SourceType {
        self.catalog.source_type()
    }

    pub fn builder(&self) -> GeneGeneSetBuilder<'_> {
        GeneGeneSetBuilder::new(&self.catalog, &self.index).with_cross_reference(self.cross_reference)
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.catalog.entries(&self.source_label, self.species.as_deref())
    }

    /// Compare the index against the gene universe and record the result.
    pub fn measure_coverage(&mut self, genes: &[Gene]) -> &CoverageReport {
        let coverage = CoverageReport::compute(&self.index, genes, self.cross_reference);
        info!(
            source = %self.source_type(),
            index = coverage.index_products,
            universe = coverage.universe_products,
            common = coverage.common,
            index_only = coverage.index_only,
            universe_only = coverage.universe_only,
            "Measured coverage"
        );
        self.report.coverage.insert(coverage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Annotation;

    #[test]
    fn test_curated_source_matches_on_symbol() {
        let input = SourceInput::curated(
            &CuratedConfig::default(),
            vec![CuratedGeneRecord { symbol: "TP53".to_string() }],
        );
        let prepared = input.prepare();

        let gene = Gene::new("ENSG00000141510").with_symbol("TP53").with_uniprots(["P04637"]);
        let sets = prepared.builder().build(&gene);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, "GS1");
        assert_eq!(sets[0].name, "Cancer Gene Census");
        assert_eq!(sets[0].annotation, Annotation::Direct);
        assert_eq!(sets[0].source_type, SourceType::CuratedSet);
    }

    #[test]
    fn test_pathway_members_come_from_secondary_records() {
        let input = SourceInput::pathway(
            &PathwayConfig::default(),
            vec![PathwaySummationRecord {
                reactome_id: "R-HSA-1".to_string(),
                reactome_name: Some("Parent".to_string()),
                summation: None,
            }],
            vec![PathwayUniprotRecord {
                reactome_id: "R-HSA-2".to_string(),
                reactome_name: Some("Child".to_string()),
                evidence_code: Some("TAS".to_string()),
                uniprot_ids: vec!["P04637".to_string()],
            }],
            vec![HierarchyNode::new("Parent").with_children(vec![HierarchyNode::new("Child")])],
        );
        let prepared = input.prepare();

        assert_eq!(prepared.report.merge.missing_primary, 1);
        assert_eq!(prepared.report.aggregation.aggregated, 1);
        assert_eq!(prepared.catalog.len(), 2);

        let entries = prepared.entries();
        let child = entries.iter().find(|e| e.id == "R-HSA-2").unwrap();
        let details = child.pathway.as_ref().unwrap();
        assert_eq!(details.species, "Homo sapiens");
        assert_eq!(details.evidence_code.as_deref(), Some("TAS"));
        assert_eq!(child.ancestor_paths.len(), 1);
    }

    #[test]
    fn test_measure_coverage_is_recorded() {
        let mut prepared = SourceInput::curated(
            &CuratedConfig::default(),
            vec![CuratedGeneRecord { symbol: "KRAS".to_string() }],
        )
        .prepare();

        let coverage = prepared.measure_coverage(&[Gene::new("G1").with_symbol("TP53")]).clone();
        assert_eq!(coverage.common, 0);
        assert_eq!(prepared.report.coverage, Some(coverage));
    }
}
