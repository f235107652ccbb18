mod inputs;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};

use geneset_core::config::Config;
use geneset_core::logging::{init_tracing, init_tracing_with_filter, VERBOSE_LOG_FILTER};
use geneset_core::{JsonFileWriter, Pipeline};

use inputs::{load_genes, load_sources, InputArgs};

#[derive(Parser)]
#[command(name = "geneset")]
#[command(about = "Build per-gene GO term, pathway and curated gene set annotations", long_about = None)]
struct Cli {
    /// Debug logging for every module, overriding GENESET_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every source over the gene universe and write the results
    Run {
        /// Config file (default: ./geneset.toml, then the user config)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print catalog and report JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Print the default configuration
    Config,
    /// Load, merge and prune every source without writing anything
    Check {
        /// Config file (default: ./geneset.toml, then the user config)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        inputs: InputArgs,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(&path).wrap_err_with(|| format!("loading config {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.verbose {
        init_tracing_with_filter(VERBOSE_LOG_FILTER);
    } else {
        init_tracing();
    }

    match cli.command {
        Commands::Run {
            config,
            out,
            pretty,
            inputs,
        } => run(load_config(config)?, out, pretty, inputs),
        Commands::Config => {
            print!("{}", Config::default_config_string());
            Ok(())
        }
        Commands::Check { config, inputs } => check(load_config(config)?, inputs),
    }
}

fn run(mut config: Config, out: Option<PathBuf>, pretty: bool, args: InputArgs) -> Result<()> {
    if let Some(out) = out {
        config.output.dir = out;
    }
    config.output.pretty |= pretty;

    let inputs = args.resolve(&config.inputs);
    let genes = load_genes(&inputs)?;
    let sources = load_sources(&config, &inputs)?;

    let pb = ProgressBar::new(genes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} genes ({eta})")?,
    );

    let writer = JsonFileWriter::with_config(&config.output);
    let mut pipeline = Pipeline::new(writer).with_settings(config.pipeline.clone());
    let report = pipeline.run_with_progress(sources, &genes, |written| pb.set_position(written as u64))?;
    pb.finish_and_clear();

    println!("Run {}", report.run_id);
    println!("  Genes:     {} ({} annotated)", report.genes, report.genes_annotated);
    println!("  Direct:    {}", report.direct);
    println!("  Inferred:  {}", report.inferred);
    for source in &report.sources {
        println!(
            "  {:<14} {} nodes kept, {} genes annotated",
            source.source_type.display_name(),
            source.prune.nodes_after,
            source.genes_annotated
        );
    }
    if let Some(duration) = report.duration() {
        println!("  Elapsed:   {:.2}s", duration.num_milliseconds() as f64 / 1000.0);
    }
    println!("  Output:    {}", pipeline.writer().dir().display());
    Ok(())
}

fn check(config: Config, args: InputArgs) -> Result<()> {
    let inputs = args.resolve(&config.inputs);
    let genes = match inputs.genes {
        Some(_) => Some(load_genes(&inputs)?),
        None => None,
    };

    for source in load_sources(&config, &inputs)? {
        let mut prepared = source.prepare();
        if let Some(genes) = &genes {
            prepared.measure_coverage(genes);
        }
        let report = &prepared.report;

        println!("{}", report.source_type.display_name());
        println!(
            "  Nodes:        {} merged, {} kept, {} partial",
            report.prune.nodes_before, report.prune.nodes_after, report.merge.partial_nodes
        );
        println!("  Paths:        {}", prepared.catalog.path_count());
        println!(
            "  Associations: {} rows, {} negated, {} suppressed, {} pairs",
            report.aggregation.total,
            report.aggregation.negative,
            report.aggregation.suppressed,
            report.aggregation.aggregated
        );
        println!("  Unknown refs: {}", report.unknown_references);
        if let Some(hierarchy) = &report.hierarchy {
            println!(
                "  Hierarchy:    {} visited, {} unresolved, {} flag conflicts",
                hierarchy.visited, hierarchy.unresolved, hierarchy.flag_conflicts
            );
        }
        if let Some(coverage) = &report.coverage {
            println!(
                "  Coverage:     {} common, {} index only, {} universe only",
                coverage.common, coverage.index_only, coverage.universe_only
            );
        }
    }
    Ok(())
}
