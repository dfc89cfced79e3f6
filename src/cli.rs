use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quality control, gap filling and climatology for daily climate series.
#[derive(Parser)]
#[command(
    name = "climaqc",
    version,
    about = "Quality control, gap filling and climatology for daily climate series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Normalize, flag outliers and fill gaps; write the enriched series.
    Run(RunArgs),
    /// Print or write the exploratory summary of a raw series.
    Summarize(SummarizeArgs),
    /// Compute monthly normals from an already processed series.
    Climatology(ClimatologyArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `summarize` subcommand.
#[derive(clap::Args)]
pub struct SummarizeArgs {
    /// Path to TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Path for the summary JSON; printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `climatology` subcommand.
#[derive(clap::Args)]
pub struct ClimatologyArgs {
    /// Path to TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Processed CSV written by `climaqc run`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the climatology CSV.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the aggregation mode (`mean` or `sum`).
    #[arg(short, long)]
    pub aggregation: Option<String>,
}
