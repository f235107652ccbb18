//! Input file flags and loading of every source's record collections.

use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::de::DeserializeOwned;
use tracing::warn;

use geneset_core::config::{Config, InputsConfig};
use geneset_core::input::load_records;
use geneset_core::model::Gene;
use geneset_core::SourceInput;

/// Input file locations. Each flag overrides the `[inputs]` config entry.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Gene universe (id, symbol, uniprotIds)
    #[arg(long)]
    pub genes: Option<PathBuf>,

    /// GO term records
    #[arg(long)]
    pub go_terms: Option<PathBuf>,

    /// GO association rows (productId, nodeId, qualifier)
    #[arg(long)]
    pub go_associations: Option<PathBuf>,

    /// Reasoner inferred trees; repeat once per reasoner output
    #[arg(long = "go-inferred")]
    pub go_inferred_trees: Vec<PathBuf>,

    /// Reactome pathway summations
    #[arg(long)]
    pub pathway_summations: Option<PathBuf>,

    /// Reactome UniProt-to-pathway records
    #[arg(long)]
    pub pathway_uniprots: Option<PathBuf>,

    /// Nested pathway hierarchy document
    #[arg(long)]
    pub pathway_hierarchy: Option<PathBuf>,

    /// Curated gene list (gene symbols)
    #[arg(long)]
    pub curated_genes: Option<PathBuf>,
}

impl InputArgs {
    /// Overlay the flags on the configured paths.
    pub fn resolve(self, config: &InputsConfig) -> InputsConfig {
        InputsConfig {
            genes: self.genes.or_else(|| config.genes.clone()),
            go_terms: self.go_terms.or_else(|| config.go_terms.clone()),
            go_associations: self.go_associations.or_else(|| config.go_associations.clone()),
            go_inferred_trees: if self.go_inferred_trees.is_empty() {
                config.go_inferred_trees.clone()
            } else {
                self.go_inferred_trees
            },
            pathway_summations: self.pathway_summations.or_else(|| config.pathway_summations.clone()),
            pathway_uniprots: self.pathway_uniprots.or_else(|| config.pathway_uniprots.clone()),
            pathway_hierarchy: self.pathway_hierarchy.or_else(|| config.pathway_hierarchy.clone()),
            curated_genes: self.curated_genes.or_else(|| config.curated_genes.clone()),
        }
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    load_records(path).wrap_err_with(|| format!("loading {}", path.display()))
}

fn load_optional<T: DeserializeOwned>(path: Option<&PathBuf>) -> Result<Vec<T>> {
    path.map_or_else(|| Ok(Vec::new()), |p| load(p))
}

/// Load the gene universe, which every run needs.
pub fn load_genes(inputs: &InputsConfig) -> Result<Vec<Gene>> {
    let path = inputs
        .genes
        .as_ref()
        .ok_or_else(|| eyre!("no gene universe given; pass --genes or set inputs.genes"))?;
    load(path)
}

/// Load every enabled source that has input files.
///
/// All files are read before any source is processed, so a bad file aborts
/// the run before anything is written.
pub fn load_sources(config: &Config, inputs: &InputsConfig) -> Result<Vec<SourceInput>> {
    let mut sources = Vec::new();

    if config.go.enabled {
        match &inputs.go_terms {
            Some(terms) => {
                let inferred = inputs
                    .go_inferred_trees
                    .iter()
                    .map(|path| load(path))
                    .collect::<Result<Vec<_>>>()?;
                sources.push(SourceInput::go(
                    &config.go,
                    load(terms)?,
                    load_optional(inputs.go_associations.as_ref())?,
                    inferred,
                ));
            }
            None => warn!("GO source enabled but no term file given, skipping"),
        }
    }

    if config.pathway.enabled {
        if inputs.pathway_summations.is_some() || inputs.pathway_uniprots.is_some() {
            sources.push(SourceInput::pathway(
                &config.pathway,
                load_optional(inputs.pathway_summations.as_ref())?,
                load_optional(inputs.pathway_uniprots.as_ref())?,
                load_optional(inputs.pathway_hierarchy.as_ref())?,
            ));
        } else {
            warn!("Pathway source enabled but no pathway files given, skipping");
        }
    }

    if config.curated.enabled {
        match &inputs.curated_genes {
            Some(path) => sources.push(SourceInput::curated(&config.curated, load(path)?)),
            None => warn!("Curated source enabled but no gene list given, skipping"),
        }
    }

    if sources.is_empty() {
        return Err(eyre!("no source has input files; see `geneset run --help`"));
    }
    Ok(sources)
}
