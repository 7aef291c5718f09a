//! `bomcheck parse` command - Inspect how an item text cell is read

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::item_text::{self, ItemCount};

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Item text to parse, e.g. "TOP: R1, R2"
    pub text: String,
}

#[derive(Serialize)]
struct ParseOutput {
    item_count: ItemCount,
    items: Vec<String>,
    unique_tokens: Vec<String>,
}

pub fn run(args: ParseArgs, global: &GlobalOpts) -> Result<()> {
    let parsed = item_text::parse(Some(&args.text));
    let output = ParseOutput {
        item_count: parsed.count,
        items: parsed.items,
        unique_tokens: item_text::parse_unique(Some(&args.text)),
    };

    match global.format.unwrap_or_default() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&output).into_diagnostic()?);
        }
        OutputFormat::Auto | OutputFormat::Md => {
            println!("{} {}", style("Item count:").bold(), output.item_count);
            println!("{} {}", style("Items:").bold(), output.items.join(" | "));
            println!(
                "{} {}",
                style("Unique tokens:").bold(),
                output.unique_tokens.join(" | ")
            );
        }
    }

    Ok(())
}
