//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tacit",
    about = "Turn captured browser sessions into task documentation",
    version
)]
pub struct Cli {
    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute metrics and deterministic chunk boundaries for a capture file
    Analyze(AnalyzeArgs),
    /// Run the full documentation pipeline against the configured provider
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to a captured-actions JSON file
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to a captured-actions JSON file
    pub input: PathBuf,

    /// TOML config for the generation client
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the rendered markdown here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
