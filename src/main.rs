//! sema CLI: knowledge graph assembly and linking engine.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use sema_tawy::config::EngineConfig;
use sema_tawy::graph::link::{LocalContainment, MatchRule, SharedCode, link};
use sema_tawy::graph::project::project;
use sema_tawy::graph::store::GraphStore;
use sema_tawy::ident::Namespace;
use sema_tawy::sources::{AssembledSource, compound, recalls, sensor};

#[derive(Parser)]
#[command(name = "sema", version, about = "Knowledge graph assembly and linking engine")]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch OpenFDA recall events and write the recalls store.
    FetchRecalls {
        /// Output Turtle file.
        #[arg(long, default_value = "recalls.ttl")]
        out: PathBuf,
    },

    /// Fetch a ChEMBL compound with PubChem synonyms and write its store.
    FetchCompound {
        /// Output Turtle file.
        #[arg(long, default_value = "compound.ttl")]
        out: PathBuf,
    },

    /// Generate a synthetic sensor series and write its store.
    GenSensor {
        /// Output Turtle file.
        #[arg(long, default_value = "sensor.ttl")]
        out: PathBuf,
    },

    /// Link stores by shared entities and write the unified store.
    Link {
        /// Turtle files of the stores to link, in order.
        #[arg(long, required = true, num_args = 2..)]
        stores: Vec<PathBuf>,

        /// Match on a shared external code (e.g. CHEMBL25) instead of
        /// local-name containment.
        #[arg(long)]
        code: Option<String>,

        /// Output Turtle file for the unified store.
        #[arg(long, default_value = "linked.ttl")]
        out: PathBuf,
    },

    /// Project a store to a node/edge view for rendering.
    Project {
        /// Turtle file of the store to project.
        store: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value = "dot")]
        format: ProjectionFormat,

        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProjectionFormat {
    /// Graphviz DOT text.
    Dot,
    /// JSON node/edge lists.
    Json,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).into_diagnostic()?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::FetchRecalls { out } => {
            let assembled = recalls::fetch(&config.recalls, &config.fetch).into_diagnostic()?;
            write_store(&assembled, &out)?;
        }

        Commands::FetchCompound { out } => {
            let assembled = compound::fetch(&config.compound, &config.fetch).into_diagnostic()?;
            write_store(&assembled, &out)?;
        }

        Commands::GenSensor { out } => {
            let assembled = sensor::generate(&config.sensor).into_diagnostic()?;
            write_store(&assembled, &out)?;
        }

        Commands::Link { stores, code, out } => {
            let loaded: Vec<GraphStore> = stores
                .iter()
                .map(|path| load_store(path))
                .collect::<Result<_>>()?;
            let refs: Vec<&GraphStore> = loaded.iter().collect();

            let rule: Box<dyn MatchRule> = match code {
                Some(code) => Box::new(SharedCode::new(code)),
                None => Box::new(LocalContainment),
            };
            let bridges = link(&refs, rule.as_ref());
            println!("Found {} bridging triples", bridges.len());

            let mut unified = loaded
                .iter()
                .skip(1)
                .fold(loaded[0].clone(), |acc, s| acc.merge(s));
            unified.extend(bridges);

            let text = unified.to_turtle().into_diagnostic()?;
            std::fs::write(&out, text).into_diagnostic()?;
            println!(
                "Wrote unified store ({} triples, {} entities) to {}",
                unified.len(),
                unified.entity_count(),
                out.display()
            );
        }

        Commands::Project { store, format, out } => {
            let loaded = load_store(&store)?;
            let projection = project(&loaded);
            let rendered = match format {
                ProjectionFormat::Dot => projection.to_dot(),
                ProjectionFormat::Json => {
                    serde_json::to_string_pretty(&projection).into_diagnostic()?
                }
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, rendered).into_diagnostic()?;
                    println!(
                        "Wrote projection ({} nodes, {} edges) to {}",
                        projection.nodes.len(),
                        projection.edges.len(),
                        path.display()
                    );
                }
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}

/// Write an assembled store as Turtle and print its batch report.
fn write_store(assembled: &AssembledSource, out: &Path) -> Result<()> {
    let text = assembled.store.to_turtle().into_diagnostic()?;
    std::fs::write(out, text).into_diagnostic()?;
    println!(
        "Wrote {} ({} triples from {} records) to {}",
        assembled.store.name(),
        assembled.store.len(),
        assembled.records,
        out.display()
    );
    for skipped in &assembled.skipped {
        println!("  skipped record {}: {}", skipped.index, skipped.reason);
    }
    Ok(())
}

/// Load a store from a Turtle file, scoping it under a namespace derived
/// from the file stem.
fn load_store(path: &Path) -> Result<GraphStore> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("store");
    let cleaned: String = stem
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '.')
        .collect();
    let namespace = Namespace::new(if cleaned.is_empty() { "store".into() } else { cleaned })
        .into_diagnostic()?;

    let text = std::fs::read_to_string(path).into_diagnostic()?;
    GraphStore::from_turtle(stem, namespace, &text).into_diagnostic()
}
