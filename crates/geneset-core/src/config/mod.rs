//! Configuration management for geneset.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `geneset.toml` file
//! 3. User config `~/.config/geneset/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Execution settings.
    pub pipeline: PipelineConfig,

    /// Gene Ontology source.
    pub go: GoConfig,

    /// Reactome pathway source.
    pub pathway: PathwayConfig,

    /// Curated gene set source.
    pub curated: CuratedConfig,

    /// Input file locations.
    pub inputs: InputsConfig,

    /// Output settings.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./geneset.toml` (project local)
    /// 2. `~/.config/geneset/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("GENESET_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
        if let Ok(threads) = std::env::var("GENESET_THREADS") {
            if let Ok(n) = threads.parse() {
                self.pipeline.threads = n;
            }
        }
        if let Ok(parallel) = std::env::var("GENESET_PARALLEL") {
            if let Ok(b) = parallel.parse() {
                self.pipeline.parallel = b;
            }
        }
        if let Ok(species) = std::env::var("GENESET_SPECIES") {
            self.pathway.species = species;
        }
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.progress_interval == 0 {
            return Err(ConfigError::Invalid("pipeline.progress_interval must be positive".into()));
        }
        if self.curated.enabled && self.curated.id.trim().is_empty() {
            return Err(ConfigError::Invalid("curated.id must not be empty".into()));
        }
        if self.output.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output.dir must not be empty".into()));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Build genes on a rayon pool.
    pub parallel: bool,

    /// Dedicated pool size; 0 uses the global pool.
    pub threads: usize,

    /// Genes between two progress log lines.
    pub progress_interval: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: DEFAULT_PARALLEL,
            threads: DEFAULT_THREADS,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Gene Ontology source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoConfig {
    pub enabled: bool,

    /// Drop terms flagged obsolete before merge.
    pub exclude_obsolete: bool,

    /// Provider label written on catalog entries.
    pub source_label: String,
}

impl Default for GoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exclude_obsolete: DEFAULT_EXCLUDE_OBSOLETE,
            source_label: DEFAULT_GO_SOURCE.to_string(),
        }
    }
}

/// Reactome pathway source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayConfig {
    pub enabled: bool,

    /// Provider label written on catalog entries.
    pub source_label: String,

    /// Species written on every pathway entry.
    pub species: String,
}

impl Default for PathwayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_label: DEFAULT_PATHWAY_SOURCE.to_string(),
            species: DEFAULT_SPECIES.to_string(),
        }
    }
}

/// Curated gene set settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratedConfig {
    pub enabled: bool,
    pub id: String,
    pub name: String,
    pub source_label: String,
    pub description: String,
}

impl Default for CuratedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            id: DEFAULT_CURATED_ID.to_string(),
            name: DEFAULT_CURATED_NAME.to_string(),
            source_label: DEFAULT_CURATED_SOURCE.to_string(),
            description: DEFAULT_CURATED_DESCRIPTION.to_string(),
        }
    }
}

/// Input file locations. Any path may be left unset and given on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    /// Gene universe.
    pub genes: Option<PathBuf>,

    pub go_terms: Option<PathBuf>,
    pub go_associations: Option<PathBuf>,

    /// One file per reasoner output.
    pub go_inferred_trees: Vec<PathBuf>,

    pub pathway_summations: Option<PathBuf>,
    pub pathway_uniprots: Option<PathBuf>,
    pub pathway_hierarchy: Option<PathBuf>,

    pub curated_genes: Option<PathBuf>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving catalogs, gene results and the run report.
    pub dir: PathBuf,

    /// Pretty-print catalog and report JSON.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pretty: false,
        }
    }
}
