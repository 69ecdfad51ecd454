use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `kg2` binary.
#[derive(Debug, Parser)]
#[command(
    name = "kg2",
    version,
    about = "Fetch, inspect and document the RTX-KG2 graph dataset"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding datasets (overrides `dataset.target_dir`)
    #[arg(short, long, global = true)]
    pub target_dir: Option<PathBuf>,

    /// Extra TOML config file layered above the project config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            target_dir: self.target_dir.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download and extract the dataset unless it is already present
    Fetch,
    /// List node tables and relationship groups
    Tables,
    /// Run a named query or ad-hoc SQL against the dataset
    Query(QueryArgs),
    /// Run the query sequence and write the Markdown report
    Report(ReportArgs),
    /// Run every step, printing each result, then write the report
    Demo(ReportArgs),
    /// Build a dataset from KG2 JSON Lines exports and pack it as an archive
    Pack(PackArgs),
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Name of a configured query (e.g. `disease_lookup`)
    #[arg(required_unless_present_any = ["sql", "list"], conflicts_with = "sql")]
    pub name: Option<String>,

    /// Ad-hoc SQL text
    #[arg(long)]
    pub sql: Option<String>,

    /// Print one record per line as it is read
    #[arg(long)]
    pub stream: bool,

    /// List configured query names instead of running one
    #[arg(long, conflicts_with_all = ["name", "sql", "stream"])]
    pub list: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report destination (overrides `report.output_path`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PackArgs {
    /// Node export, one JSON object per line
    #[arg(long)]
    pub nodes: PathBuf,

    /// Edge export, one JSON object per line
    #[arg(long)]
    pub edges: PathBuf,

    /// Directory receiving the dataset directory and `<dataset_name>.tar.gz`
    #[arg(long, default_value = "dist")]
    pub out_dir: PathBuf,
}
