//! Catalog node types.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Which classification source a node (and the gene sets derived from it) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// A Gene Ontology term.
    GoTerm,
    /// A Reactome pathway.
    Pathway,
    /// A hand-curated gene list such as the Cancer Gene Census.
    CuratedSet,
}

impl SourceType {
    /// Lowercase name used for file names and log fields.
    pub fn slug(&self) -> &'static str {
        match self {
            SourceType::GoTerm => "go_term",
            SourceType::Pathway => "pathway",
            SourceType::CuratedSet => "curated_set",
        }
    }

    /// Returns a human-readable name for the source.
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceType::GoTerm => "GO term",
            SourceType::Pathway => "Pathway",
            SourceType::CuratedSet => "Curated set",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// One merged classification unit (GO term, pathway or curated set).
///
/// `display_name` stays `None` until a primary or secondary record supplies one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Namespace-qualified identifier (`GO:0008150`, `R-HSA-109582`, `GS1`).
    pub id: String,
    pub source_type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ontology namespace (`biological_process`, ...). GO only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub alt_ids: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub obsolete: bool,
    /// Whether the pathway has a diagram. Pathway only.
    #[serde(default)]
    pub diagrammed: bool,
    /// Reactome evidence code (`TAS`, `IEA`). Pathway only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_code: Option<String>,
}

impl Node {
    /// Create an empty node with only an id.
    pub fn new(id: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            id: id.into(),
            source_type,
            display_name: None,
            description: None,
            namespace: None,
            alt_ids: Vec::new(),
            synonyms: Vec::new(),
            obsolete: false,
            diagrammed: false,
            evidence_code: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// The display name, or the id when no name was ever resolved.
    pub fn name_or_id(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

fn go_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^GO:\d{7}$").expect("valid GO id pattern"))
}

/// Whether `id` is a Gene Ontology identifier (`GO:` followed by seven digits).
pub fn is_go_id(id: &str) -> bool {
    go_id_pattern().is_match(id)
}
