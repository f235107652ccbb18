//! Persistable view of a retained catalog node.

use serde::{Deserialize, Serialize};

use crate::model::{AncestorPath, Node, SourceType};

/// Pathway-specific fields of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_code: Option<String>,
    pub species: String,
    pub diagrammed: bool,
}

/// One retained catalog node as handed to the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Provider label (`Gene Ontology`, `Reactome`, ...).
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub alt_ids: Vec<String>,
    pub synonyms: Vec<String>,
    pub ancestor_paths: Vec<AncestorPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway: Option<PathwayDetails>,
}

impl CatalogEntry {
    pub(crate) fn from_node(
        node: &Node,
        paths: &[AncestorPath],
        source_label: &str,
        species: Option<&str>,
    ) -> Self {
        let pathway = (node.source_type == SourceType::Pathway).then(|| PathwayDetails {
            evidence_code: node.evidence_code.clone(),
            species: species.unwrap_or_default().to_string(),
            diagrammed: node.diagrammed,
        });

        Self {
            id: node.id.clone(),
            name: node.name_or_id().to_string(),
            description: node.description.clone(),
            source_type: node.source_type,
            source: source_label.to_string(),
            namespace: node.namespace.clone(),
            alt_ids: node.alt_ids.clone(),
            synonyms: node.synonyms.clone(),
            ancestor_paths: paths.to_vec(),
            pathway,
        }
    }
}
