//! # redfish-cli
//!
//! Command-line front end for the Redfish conformance core: load a schema
//! directory and resolve types against it, or replay a crawl from a recorded
//! service tree. The live HTTP transport stays an external collaborator.

mod config;

use anyhow::{bail, Context};
use clap::Parser;
use config::RunConfig;
use redfish_crawler::{Crawler, DirectoryFetcher, UriIndex};
use redfish_registry::{SchemaRegistry, TypeDef};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Parser)]
#[command(name = "redfish-check")]
#[command(about = "Redfish conformance core: schema resolution and crawl replay")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Resolve a fully-qualified type against a directory of CSDL files
    Resolve {
        /// Type identifier, e.g. ServiceRoot.v1_5_0.ServiceRoot
        identifier: String,

        /// Directory of CSDL .xml files
        #[arg(short, long)]
        schema_dir: Option<PathBuf>,
    },

    /// Replay a resource graph crawl from a recorded service tree
    Crawl {
        /// Root URI to start from, e.g. /redfish/v1/
        root_uri: Option<String>,

        /// Directory holding the recorded payload tree (mockup layout)
        #[arg(short, long)]
        fixtures: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = RunConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve {
            identifier,
            schema_dir,
        } => {
            let Some(dir) = schema_dir.or(config.schema_dir) else {
                bail!("no schema directory given (use --schema-dir or the config file)");
            };
            let registry = load_schema_dir(&dir)?;
            resolve(&registry, &identifier)
        }
        Commands::Crawl { root_uri, fixtures } => {
            let Some(dir) = fixtures.or(config.fixtures) else {
                bail!("no fixtures directory given (use --fixtures or the config file)");
            };
            let root = root_uri
                .or(config.root_uri)
                .unwrap_or_else(|| "/redfish/v1/".to_string());
            crawl(&dir, &root);
            Ok(())
        }
    }
}

/// Load every `.xml` file in the directory. A document that fails to parse
/// is skipped with a warning; the rest of the set still loads.
fn load_schema_dir(dir: &Path) -> anyhow::Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading schema directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.extension().map(|e| e == "xml").unwrap_or(false) {
            if let Err(err) = registry.load_file(&path) {
                warn!("skipping schema document: {}", err);
            }
        }
    }

    if registry.documents().is_empty() {
        bail!("no CSDL documents loaded from {}", dir.display());
    }
    Ok(registry)
}

fn resolve(registry: &SchemaRegistry, identifier: &str) -> anyhow::Result<()> {
    match registry.resolve_type(identifier) {
        Some((namespace, def)) => {
            let kind = match def {
                TypeDef::Entity(_) => "EntityType",
                TypeDef::Complex(_) => "ComplexType",
                TypeDef::Enum(_) => "EnumType",
                TypeDef::Action(_) => "Action",
            };
            println!("{} {} found in namespace {}", kind, def.name(), namespace.name);
            if let Some(structured) = def.as_structured() {
                for property in structured.properties() {
                    println!("  Property {} : {}", property.name, property.type_name);
                }
                for nav in structured.navigation_properties() {
                    println!("  NavigationProperty {} : {}", nav.name, nav.type_name);
                }
            }
            Ok(())
        }
        None => bail!("type {} not found in the loaded schema set", identifier),
    }
}

fn crawl(fixtures: &Path, root_uri: &str) {
    let fetcher = DirectoryFetcher::new(fixtures);
    let result = Crawler::new(fetcher).crawl(root_uri);

    println!("Full index ({} resources):", result.full.len());
    print_index(&result.full);
    println!();
    println!("Without Members collections ({} resources):", result.no_members.len());
    print_index(&result.no_members);
}

fn print_index(index: &UriIndex) {
    for (key, uri) in index.iter() {
        println!("  {key} -> {uri}");
    }
}
