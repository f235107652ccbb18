//! Genes and the gene sets they are annotated with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::node::SourceType;

/// How a gene set membership was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Annotation {
    /// The node itself lists one of the gene's products.
    Direct,
    /// The node is an ancestor of a directly annotated node.
    Inferred,
}

/// Which gene identifier joins a gene to a source's membership records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossReference {
    /// UniProt accessions (GO associations, Reactome uniprot lists).
    Uniprot,
    /// HGNC gene symbol (curated lists).
    Symbol,
}

/// A gene from the gene universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    #[serde(alias = "geneId")]
    pub id: String,
    #[serde(default, alias = "geneSymbol", skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, alias = "uniprotIds")]
    pub uniprot_ids: BTreeSet<String>,
}

impl Gene {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: None,
            uniprot_ids: BTreeSet::new(),
        }
    }

    pub fn with_uniprots<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uniprot_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// The product ids this gene contributes for the given cross-reference kind.
    pub fn cross_references(&self, kind: CrossReference) -> Vec<&str> {
        match kind {
            CrossReference::Uniprot => self.uniprot_ids.iter().map(String::as_str).collect(),
            CrossReference::Symbol => self.symbol.as_deref().into_iter().collect(),
        }
    }
}

/// One gene set a gene belongs to.
///
/// At most one exists per `(gene, id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneGeneSet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub annotation: Annotation,
    /// Qualifiers of the direct associations behind a DIRECT GO annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifiers: Option<BTreeSet<String>>,
}

impl GeneGeneSet {
    pub fn is_direct(&self) -> bool {
        self.annotation == Annotation::Direct
    }
}

/// Every gene set computed for one gene in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneAnnotations {
    pub gene_id: String,
    pub gene_sets: Vec<GeneGeneSet>,
}

impl GeneAnnotations {
    pub fn is_empty(&self) -> bool {
        self.gene_sets.is_empty()
    }

    /// Count of `(direct, inferred)` records.
    pub fn counts(&self) -> (usize, usize) {
        let direct = self.gene_sets.iter().filter(|s| s.is_direct()).count();
        (direct, self.gene_sets.len() - direct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_references() {
        let gene = Gene::new("ENSG00000141510")
            .with_symbol("TP53")
            .with_uniprots(["P04637", "K7PPA8"]);

        assert_eq!(gene.cross_references(CrossReference::Uniprot), vec!["K7PPA8", "P04637"]);
        assert_eq!(gene.cross_references(CrossReference::Symbol), vec!["TP53"]);
        assert!(Gene::new("ENSG1").cross_references(CrossReference::Symbol).is_empty());
    }

    #[test]
    fn test_gene_gene_set_serializes_type_field() {
        let set = GeneGeneSet {
            id: "GO:0005634".to_string(),
            name: "nucleus".to_string(),
            source_type: SourceType::GoTerm,
            annotation: Annotation::Inferred,
            qualifiers: None,
        };
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["type"], "GO_TERM");
        assert_eq!(json["annotation"], "INFERRED");
        assert!(json.get("qualifiers").is_none());
    }
}
