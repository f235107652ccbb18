//! Default values for geneset configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Pipeline Defaults
// ============================================================================

/// Build genes in parallel.
pub const DEFAULT_PARALLEL: bool = true;

/// Worker threads; 0 uses the rayon global pool.
pub const DEFAULT_THREADS: usize = 0;

/// Genes between two progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

// ============================================================================
// Source Defaults
// ============================================================================

/// Provider label of GO catalog entries.
pub const DEFAULT_GO_SOURCE: &str = "Gene Ontology";

/// Skip GO terms flagged obsolete.
pub const DEFAULT_EXCLUDE_OBSOLETE: bool = true;

/// Provider label of pathway catalog entries.
pub const DEFAULT_PATHWAY_SOURCE: &str = "Reactome";

/// Species of every pathway.
pub const DEFAULT_SPECIES: &str = "Homo sapiens";

/// Id of the curated gene set.
pub const DEFAULT_CURATED_ID: &str = "GS1";

/// Name of the curated gene set.
pub const DEFAULT_CURATED_NAME: &str = "Cancer Gene Census";

/// Provider label of the curated gene set.
pub const DEFAULT_CURATED_SOURCE: &str = "COSMIC - Sanger";

/// Description of the curated gene set.
pub const DEFAULT_CURATED_DESCRIPTION: &str =
    "Genes for which mutations have been causally implicated in cancer";

// ============================================================================
// Output Defaults
// ============================================================================

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "geneset-out";

/// Per-gene results file name.
pub const DEFAULT_GENE_FILE: &str = "gene-gene-sets.jsonl";

/// Run report file name.
pub const DEFAULT_REPORT_FILE: &str = "report.json";

// ============================================================================
// Config Locations
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "geneset.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "geneset";

/// Config file name under the user config dir.
pub const USER_CONFIG_FILE: &str = "config.toml";
