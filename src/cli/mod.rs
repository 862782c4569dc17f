//! Command-line parsing for the tag channel planner.
//!
//! Argument parsing and command dispatch are kept apart from the planner so the
//! numeric code never sees clap types.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "tuner",
    version,
    about = "Radio center frequency and channel planner for tag receivers"
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace, -vvv with source locations). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan the radio center frequency and channels for a set of tags.
    Plan(PlanArgs),
    /// Print a previously exported plan JSON.
    Show(ShowArgs),
}

/// Options for planning.
#[derive(Debug, Parser, Clone)]
pub struct PlanArgs {
    /// Radio sample rate in Hz (also the acquisition bandwidth).
    #[arg(short = 's', long, env = "TUNER_SAMPLE_RATE", value_name = "HZ")]
    pub sample_rate: f64,

    /// Number of channels the channelizer produces.
    #[arg(short = 'c', long, env = "TUNER_CHANNELS", value_name = "N")]
    pub channels: usize,

    /// Tag frequency in MHz. Repeat the flag or pass a comma separated list.
    #[arg(
        short = 't',
        long = "tag",
        value_name = "MHZ",
        value_delimiter = ',',
        required_unless_present = "tags_file",
        conflicts_with = "tags_file"
    )]
    pub tags: Vec<f64>,

    /// Tags CSV with header `id,frequency_mhz[,dual_pulse]`.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub tags_file: Option<PathBuf>,

    /// Render an ASCII channel map.
    #[arg(long)]
    pub plot: bool,

    /// Channel map width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Export the plan (inputs + outputs) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export per-tag assignments to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

/// Options for showing a saved plan.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Plan JSON file produced by `tuner plan --export`.
    #[arg(long, value_name = "JSON")]
    pub plan: PathBuf,

    /// Render an ASCII channel map.
    #[arg(long)]
    pub plot: bool,

    /// Channel map width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,
}
