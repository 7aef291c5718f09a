//! `bomcheck check` command - Run all BOM checks on a spreadsheet

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::checks::{self, CheckKind, CheckResult, Severity};
use crate::cli::helpers::{markdown_table, plural, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{normalize, Config, Table};
use crate::ingest;
use crate::report::{self, Report, Section};

/// Widest cell shown in terminal tables
const MAX_CELL_WIDTH: usize = 40;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// BOM spreadsheet (.xlsx, .xlsm, .xls, .xlsb, .ods or .csv)
    pub file: PathBuf,

    /// Write the report workbook to this path
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Write the report workbook to the configured report name in the current directory
    #[arg(long, conflicts_with = "output")]
    pub save: bool,

    /// Title rows above the header row (default: 6)
    #[arg(long)]
    pub skip_rows: Option<usize>,

    /// Sheet to read (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Show the first N rows of the normalized data before the results
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Include the normalized data as an extra "Data" sheet
    #[arg(long)]
    pub with_data: bool,

    /// Exit with an error if any check fails
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let options = config.load_options(args.skip_rows, args.sheet.clone());
    let format = OutputFormat::resolve(global.format, config.default_format.as_deref());

    let raw = ingest::load(&args.file, &options)?;
    let table = normalize(&raw)?;
    if table.is_empty() {
        tracing::warn!(path = %args.file.display(), "no data rows below the header");
    }

    let results = checks::run_all(&table);
    let mut report = report::aggregate(&results, table.columns());
    if args.with_data {
        report = report.with_data(&table);
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&report).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Md => print_markdown(&report, &table, args.preview),
        OutputFormat::Auto => print_styled(&args, global, &table, &results, &report),
    }

    let output_path = match (&args.output, args.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(config.report_name())),
        (None, false) => None,
    };
    if let Some(path) = output_path {
        report::xlsx::save(&report, &path)?;
        if !global.quiet {
            eprintln!(
                "{} Report written to: {}",
                style("✓").green(),
                path.display()
            );
        }
    }

    if args.strict && !report.all_passed() {
        return Err(miette::miette!(
            "BOM check failed: {} failed",
            plural(report.failed_count(), "check")
        ));
    }

    Ok(())
}

fn print_styled(
    args: &CheckArgs,
    global: &GlobalOpts,
    table: &Table,
    results: &[CheckResult],
    report: &Report,
) {
    if !global.quiet {
        println!(
            "{} Checking {} ({})\n",
            style("→").blue(),
            args.file.display(),
            plural(table.len(), "row")
        );

        if let Some(n) = args.preview {
            println!("{}", style("Preview of Data").bold());
            println!("{}\n", render_section(&report::data_section(table), Some(n)));
        }
    }

    for result in results {
        print_verdict(result);
    }

    for section in report.sections.iter().skip(1) {
        if section.name == report::DATA_SHEET {
            continue;
        }
        println!("\n{}", style(&section.name).bold());
        println!("{}", render_section(section, None));
    }

    if !global.quiet {
        println!("\n{}", style("Summary").bold());
        if let Some(summary) = report.section(report::SUMMARY_SHEET) {
            println!("{}", render_section(summary, None));
        }
    }
}

fn print_verdict(result: &CheckResult) {
    let kind = result.kind;
    if result.passed() {
        println!("{} {}", style("✓").green(), kind.success_message());
        return;
    }

    let count = plural(result.offenses.len(), offense_noun(kind));
    match kind.severity() {
        Severity::Warning => println!(
            "{} {} ({})",
            style("!").yellow(),
            style(kind.failure_message()).yellow(),
            count
        ),
        Severity::Error => println!(
            "{} {} ({})",
            style("✗").red(),
            style(kind.failure_message()).red(),
            count
        ),
    }
}

fn offense_noun(kind: CheckKind) -> &'static str {
    match kind {
        CheckKind::DuplicateItems => "occurrence",
        _ => "row",
    }
}

fn print_markdown(report: &Report, table: &Table, preview: Option<usize>) {
    if let Some(n) = preview {
        println!("## Preview of Data\n");
        println!("{}\n", render_section(&report::data_section(table), Some(n)));
    }
    for section in &report.sections {
        println!("## {}\n", section.name);
        println!("{}\n", render_section(section, None));
    }
}

/// Render a section as a markdown table, optionally only its first `limit` rows
fn render_section(section: &Section, limit: Option<usize>) -> String {
    let limit = limit.unwrap_or(section.rows.len());
    markdown_table(
        &section.headers,
        section.rows.iter().take(limit).map(|row| {
            row.iter()
                .map(|cell| truncate_str(&cell.display(), MAX_CELL_WIDTH))
                .collect::<Vec<_>>()
        }),
    )
}
