use geneset_core::catalog::{CatalogBuilder, PrimaryRecord, SecondaryRecord};
use geneset_core::input::{GoTermRecord, PathwaySummationRecord, PathwayUniprotRecord};
use geneset_core::SourceType;

fn summation(id: &str, name: &str) -> PathwaySummationRecord {
    PathwaySummationRecord {
        reactome_id: id.to_string(),
        reactome_name: Some(name.to_string()),
        summation: None,
    }
}

fn uniprot(id: &str, name: &str, evidence: &str) -> PathwayUniprotRecord {
    PathwayUniprotRecord {
        reactome_id: id.to_string(),
        reactome_name: Some(name.to_string()),
        evidence_code: Some(evidence.to_string()),
        uniprot_ids: vec!["P04637".to_string()],
    }
}

#[test]
fn test_primary_name_wins_over_secondary() {
    let catalog = CatalogBuilder::new(SourceType::Pathway)
        .primary([summation("X", "Alpha")])
        .secondary([uniprot("X", "Beta", "TAS")])
        .build();

    assert_eq!(catalog.get("X").unwrap().name_or_id(), "Alpha");
}

#[test]
fn test_secondary_name_without_primary() {
    let catalog = CatalogBuilder::new(SourceType::Pathway)
        .primary(Vec::<PrimaryRecord>::new())
        .secondary([uniprot("X", "Beta", "TAS")])
        .build();

    assert_eq!(catalog.get("X").unwrap().name_or_id(), "Beta");
    assert_eq!(catalog.stats().missing_primary, 1);
}

#[test]
fn test_secondary_batches_never_replace_names() {
    let catalog = CatalogBuilder::new(SourceType::Pathway)
        .primary([summation("X", "Alpha")])
        .secondary([uniprot("Y", "First", "IEA")])
        .secondary([uniprot("X", "Beta", "TAS"), uniprot("Y", "Second", "TAS")])
        .build();

    assert_eq!(catalog.get("X").unwrap().name_or_id(), "Alpha");
    assert_eq!(catalog.get("Y").unwrap().name_or_id(), "First");
    assert_eq!(catalog.get("Y").unwrap().evidence_code.as_deref(), Some("TAS"));
    assert_eq!(catalog.stats().secondary_records, 3);
}

#[test]
fn test_go_terms_convert_and_merge() {
    let terms: Vec<GoTermRecord> = serde_json::from_str(
        r#"[
            {"id":"GO:0005634","name":"nucleus","namespace":"cellular_component","altIds":["GO:0005636"]},
            {"id":"GO:0005635","name":"nuclear envelope","obsolete":true}
        ]"#,
    )
    .unwrap();

    let catalog = CatalogBuilder::new(SourceType::GoTerm)
        .exclude_obsolete(true)
        .primary(terms)
        .build();

    let nucleus = catalog.get("GO:0005634").unwrap();
    assert_eq!(nucleus.namespace.as_deref(), Some("cellular_component"));
    assert_eq!(nucleus.alt_ids, vec!["GO:0005636"]);
    assert!(!catalog.contains("GO:0005635"));
}

#[test]
fn test_partial_node_from_secondary_only() {
    let record = SecondaryRecord {
        id: "R-HSA-9".to_string(),
        ..SecondaryRecord::default()
    };
    let catalog = CatalogBuilder::new(SourceType::Pathway)
        .primary(Vec::<PrimaryRecord>::new())
        .secondary([record])
        .build();

    let node = catalog.get("R-HSA-9").unwrap();
    assert!(node.display_name.is_none());
    assert_eq!(node.name_or_id(), "R-HSA-9");
}
