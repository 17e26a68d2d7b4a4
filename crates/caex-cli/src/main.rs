//! Command line access to CAEX documents: summary and criteria queries

use anyhow::{Context, Result};
use caex_filter::{apply_filter, SearchMode};
use caex_generic::{GenericNode, Value};
use caex_schema::CaexDocument;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "caex")]
#[command(about = "Inspect and query CAEX / AutomationML documents")]
#[command(version)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print schema version, file name and generic node count
    Info {
        /// CAEX document (.aml)
        file: PathBuf,
    },
    /// Print the elements matching criteria such as `Attribute[Name='Type']`
    Query {
        /// CAEX document (.aml)
        file: PathBuf,

        /// Comma separated criteria alternatives
        criteria: String,

        /// Only look at the root's direct children
        #[arg(long)]
        children: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One element per line
    Text,
    /// A JSON array
    Json,
}

#[derive(Serialize)]
struct Match<'a> {
    element: &'static str,
    attributes: &'a BTreeMap<&'static str, Value>,
    path: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Info { file } => info_command(&file),
        Command::Query {
            file,
            criteria,
            children,
            format,
        } => query_command(&file, &criteria, children, format),
    }
}

fn load(file: &Path) -> Result<CaexDocument> {
    let doc = CaexDocument::read(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    info!(path = %file.display(), version = %doc.schema_version(), "loaded document");
    Ok(doc)
}

fn info_command(file: &Path) -> Result<()> {
    let doc = load(file)?;
    let tree = doc.generalize().context("failed to generalize document")?;

    println!("schema version: {}", doc.schema_version());
    println!("file name: {}", doc.file_name().unwrap_or("-"));
    println!("nodes: {}", tree.len());
    Ok(())
}

fn query_command(file: &Path, criteria: &str, children: bool, format: Format) -> Result<()> {
    let doc = load(file)?;
    let tree = doc.generalize().context("failed to generalize document")?;
    let mode = if children {
        SearchMode::Children
    } else {
        SearchMode::All
    };

    let results = apply_filter(tree.root(), criteria, mode);
    debug!(criteria, %mode, results = results.len(), "query finished");

    match format {
        Format::Text => {
            for node in &results {
                println!("{node}");
            }
        }
        Format::Json => {
            let matches: Vec<Match<'_>> = results
                .iter()
                .map(|node| Match {
                    element: node.element_name(),
                    attributes: node.attributes(),
                    path: path_of(node),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
    }
    Ok(())
}

/// `/CAEXFile/InstanceHierarchy[Plant]/InternalElement[Tank]`, named by `Name`
fn path_of(node: &GenericNode<'_>) -> String {
    let mut segments: Vec<String> = std::iter::once(*node)
        .chain(node.ancestors())
        .map(|node| match node.attribute("Name").and_then(Value::as_text) {
            Some(name) => format!("{}[{}]", node.element_name(), name),
            None => node.element_name().to_string(),
        })
        .collect();
    segments.reverse();
    format!("/{}", segments.join("/"))
}
