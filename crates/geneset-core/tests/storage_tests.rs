use std::fs;

use geneset_core::catalog::{CatalogBuilder, CatalogEntry, PrimaryRecord};
use geneset_core::input::HierarchyNode;
use geneset_core::model::{Association, Gene};
use geneset_core::{AssociationAggregator, GeneAnnotations, GeneSetWriter, JsonFileWriter, SourceType};
use tempfile::TempDir;

fn entries() -> Vec<CatalogEntry> {
    let mut catalog = CatalogBuilder::new(SourceType::Pathway)
        .primary([PrimaryRecord::new("R-HSA-1", "Parent"), PrimaryRecord::new("R-HSA-2", "Child")])
        .build();
    catalog.attach_hierarchy(&[HierarchyNode::new("Parent").with_children(vec![HierarchyNode::new("Child")])]);

    let (index, _) = AssociationAggregator::aggregate([Association::positive("P04637", "R-HSA-2")]);
    let (catalog, _) = catalog.prune(&index);
    catalog.entries("Reactome", Some("Homo sapiens"))
}

#[test]
fn test_catalog_file_round_trips() {
    let temp = TempDir::new().unwrap();
    let mut writer = JsonFileWriter::new(temp.path()).pretty(true);
    let written = entries();

    writer.write_catalog(SourceType::Pathway, &written).unwrap();
    writer.finish().unwrap();

    let content = fs::read_to_string(writer.catalog_path(SourceType::Pathway)).unwrap();
    assert!(content.contains("\"ancestorPaths\""));
    assert!(content.contains("\"type\": \"PATHWAY\""));

    let loaded: Vec<CatalogEntry> = serde_json::from_str(&content).unwrap();
    assert_eq!(loaded, written);
}

#[test]
fn test_gene_lines_keep_write_order() {
    let temp = TempDir::new().unwrap();
    let mut writer = JsonFileWriter::new(temp.path());

    for id in ["G3", "G1", "G2"] {
        let gene = Gene::new(id);
        writer
            .write_gene(&GeneAnnotations {
                gene_id: gene.id,
                gene_sets: Vec::new(),
            })
            .unwrap();
    }
    writer.finish().unwrap();
    assert_eq!(writer.genes_written(), 3);

    let content = fs::read_to_string(writer.genes_path()).unwrap();
    let ids: Vec<String> = content
        .lines()
        .map(|line| serde_json::from_str::<GeneAnnotations>(line).unwrap().gene_id)
        .collect();
    assert_eq!(ids, vec!["G3", "G1", "G2"]);
}

#[test]
fn test_no_genes_no_gene_file() {
    let temp = TempDir::new().unwrap();
    let mut writer = JsonFileWriter::new(temp.path());
    writer.finish().unwrap();
    assert!(!writer.genes_path().exists());
}
