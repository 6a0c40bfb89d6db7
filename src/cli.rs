//! CLI interface for the resume scorer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Rubric-based scoring for structured resume records")]
#[command(long_about = "Score candidate records extracted from resumes against a fixed rubric and report a recommendation tier")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one or more candidate records
    Score {
        /// Record files (.json, .jsonl, .ndjson), or "-" for stdin
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Show the per-category breakdown and candidate details
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Reduce decorated email fields to the bare address before scoring
        #[arg(long)]
        normalize_email: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,

        /// Exit with an error if any candidate scores below this value
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        fail_below: Option<u32>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}
