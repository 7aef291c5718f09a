//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, config::ConfigCommands, parse::ParseArgs,
};

#[derive(Parser)]
#[command(name = "bomcheck")]
#[command(author, version, about = "BOM data quality checker")]
#[command(long_about = "Validate Bill-of-Materials spreadsheets against fixed data quality rules and export a review report.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a BOM spreadsheet and report rule violations
    Check(CheckArgs),

    /// Show how an item text cell is parsed
    Parse(ParseArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled summary followed by markdown tables
    #[default]
    Auto,
    /// Markdown tables only, no styling
    Md,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the format from the flag, falling back to the configured default
    pub fn resolve(flag: Option<OutputFormat>, configured: Option<&str>) -> OutputFormat {
        flag.or_else(|| configured.and_then(|s| OutputFormat::from_str(s, true).ok()))
            .unwrap_or_default()
    }
}
