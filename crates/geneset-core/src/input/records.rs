//! Serde shapes of the records produced by the external source readers.

use serde::{Deserialize, Serialize};

use crate::catalog::{PrimaryRecord, SecondaryRecord};
use crate::model::Association;

/// A GO term extracted from the ontology file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoTermRecord {
    pub id: String,
    #[serde(default, alias = "name")]
    pub display_name: Option<String>,
    #[serde(default, alias = "def")]
    pub description: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub alt_ids: Vec<String>,
    #[serde(default, alias = "synonym")]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub obsolete: bool,
}

impl From<GoTermRecord> for PrimaryRecord {
    fn from(term: GoTermRecord) -> Self {
        PrimaryRecord {
            id: term.id,
            display_name: term.display_name,
            description: term.description,
            namespace: term.namespace,
            alt_ids: term.alt_ids,
            synonyms: term.synonyms,
            obsolete: term.obsolete,
        }
    }
}

/// A row of the Reactome pathway summation file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwaySummationRecord {
    pub reactome_id: String,
    #[serde(default)]
    pub reactome_name: Option<String>,
    #[serde(default)]
    pub summation: Option<String>,
}

impl From<PathwaySummationRecord> for PrimaryRecord {
    fn from(record: PathwaySummationRecord) -> Self {
        PrimaryRecord {
            id: record.reactome_id,
            display_name: record.reactome_name,
            description: record.summation,
            ..PrimaryRecord::default()
        }
    }
}

/// A row of the Reactome UniProt-to-pathway file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayUniprotRecord {
    pub reactome_id: String,
    #[serde(default)]
    pub reactome_name: Option<String>,
    #[serde(default)]
    pub evidence_code: Option<String>,
    #[serde(default)]
    pub uniprot_ids: Vec<String>,
}

impl From<PathwayUniprotRecord> for SecondaryRecord {
    fn from(record: PathwayUniprotRecord) -> Self {
        SecondaryRecord {
            id: record.reactome_id,
            display_name: record.reactome_name,
            evidence_code: record.evidence_code,
            members: record.uniprot_ids,
        }
    }
}

/// One row of a gene association file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationRow {
    #[serde(alias = "uniprotId")]
    pub product_id: String,
    #[serde(alias = "goId")]
    pub node_id: String,
    #[serde(default)]
    pub qualifier: Option<String>,
}

impl From<AssociationRow> for Association {
    fn from(row: AssociationRow) -> Self {
        Association::from_qualifier(row.product_id, row.node_id, row.qualifier.as_deref())
    }
}

/// A node of the nested pathway hierarchy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub display_name: String,
    /// Stable id, when the hierarchy export carries one. Otherwise the display
    /// name is resolved against the catalog.
    #[serde(default, alias = "stId")]
    pub id: Option<String>,
    #[serde(default, alias = "hasDiagram")]
    pub diagrammed: bool,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            id: None,
            diagrammed: false,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn diagrammed(mut self, diagrammed: bool) -> Self {
        self.diagrammed = diagrammed;
        self
    }

    pub fn with_children(mut self, children: Vec<HierarchyNode>) -> Self {
        self.children = children;
        self
    }
}

/// One ancestor in a reasoner's inferred tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredTreeNode {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub relation: Option<String>,
    /// Longest distance from the term; 0 is the term itself.
    pub level: i32,
}

/// A reasoner's inferred ancestor tree for one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredTreeRecord {
    pub id: String,
    #[serde(default, alias = "inferredTree")]
    pub ancestors: Vec<InferredTreeNode>,
}

/// A member of a curated gene list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedGeneRecord {
    #[serde(alias = "Gene Symbol", alias = "geneSymbol")]
    pub symbol: String,
}
