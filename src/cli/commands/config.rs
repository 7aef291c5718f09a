//! `bomcheck config` command - Inspect configuration

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::core::config::{Config, LOCAL_CONFIG_FILE};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("skip_rows", "Title rows above the header row (default: 6)"),
    ("sheet", "Sheet to read (default: first sheet)"),
    ("report_name", "File name used by `check --save`"),
    ("default_format", "Default output format (auto, md, json, yaml)"),
];

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        if !VALID_KEYS.iter().any(|(k, _)| *k == key.as_str()) {
            return Err(miette::miette!("Unknown config key '{}'", key));
        }
        println!("{}", get_config_value(&config, key));
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        println!(
            "  {}: {}",
            style(key).cyan(),
            style(get_config_value(&config, key)).yellow()
        );
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags");
    println!("  2. Environment variables (BOMCHECK_SKIP_ROWS, BOMCHECK_SHEET)");
    println!("  3. Local config ({})", LOCAL_CONFIG_FILE);
    println!("  4. Global config (~/.config/bomcheck/config.yaml)");

    Ok(())
}

fn run_path() -> Result<()> {
    let global_path = Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))?;
    let local_path = PathBuf::from(LOCAL_CONFIG_FILE);

    println!("{}", style("Configuration file paths:").bold());
    println!();
    for (label, path) in [("Global:", global_path), ("Local: ", local_path)] {
        println!("  {} {}", style(label).cyan(), path.display());
        if path.exists() {
            println!("          {}", style("(exists)").green());
        } else {
            println!("          {}", style("(not created)").dim());
        }
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    Ok(())
}

/// Effective value of a key, with defaults filled in
fn get_config_value(config: &Config, key: &str) -> String {
    match key {
        "skip_rows" => config.skip_rows().to_string(),
        "sheet" => config
            .sheet
            .clone()
            .unwrap_or_else(|| "(first sheet)".to_string()),
        "report_name" => config.report_name().to_string(),
        "default_format" => config
            .default_format
            .clone()
            .unwrap_or_else(|| "auto".to_string()),
        _ => String::new(),
    }
}
