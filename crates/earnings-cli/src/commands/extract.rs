//! Extract command - pull figures out of a single text.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use console::{measure_text_width, pad_str, style, Alignment};
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

use earnings_core::{
    DisplayView, EarningsConfig, ExtractionResult, Field, FinancialTextParser, MatchPolicy,
};

use super::config::load_config;

/// Warning shown when there is nothing to extract from.
pub const EMPTY_INPUT_WARNING: &str = "Please enter some text to extract financial data.";

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (default: stdin)
    input: Option<PathBuf>,

    /// Text to extract from, instead of a file
    #[arg(short, long, conflicts_with = "input")]
    text: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config, then table)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Match policy (overrides config)
    #[arg(long)]
    policy: Option<MatchPolicy>,

    /// Print the raw record and the display view as JSON
    #[arg(long)]
    debug: bool,

    /// Show which rule produced each field
    #[arg(long)]
    show_rules: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two-row table (Revenue, EPS)
    Table,
    /// Raw four-field record as JSON
    Json,
    /// Table rows as CSV
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// Resolve the format from the CLI flag, falling back to the config.
    pub fn resolve(flag: Option<OutputFormat>, config: &EarningsConfig) -> OutputFormat {
        flag.unwrap_or_else(|| {
            OutputFormat::from_str(&config.display.format, true).unwrap_or_else(|_| {
                warn!(
                    "Unknown output format '{}' in config, using table",
                    config.display.format
                );
                OutputFormat::Table
            })
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Table | OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let text = read_input(&args).await?;

    if text.trim().is_empty() {
        warn!("Empty input, nothing extracted");
        eprintln!("{} {}", style("⚠").yellow(), EMPTY_INPUT_WARNING);
        return Ok(());
    }

    let policy = args.policy.unwrap_or(config.extraction.policy);
    info!("Extracting from {} bytes with {} policy", text.len(), policy);

    let parser = FinancialTextParser::from_config(&config.extraction).with_policy(policy);
    let report = parser.parse(&text);
    let view = DisplayView::with_sentinel(&report.result, &config.display.not_available);

    let format = OutputFormat::resolve(args.format, &config);
    let output = format_result(&report.result, &view, format)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output)
            .await
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if args.show_rules {
        println!();
        println!("{}", style("Rules:").bold());
        for found in &report.matches {
            println!("  {}", found);
        }
        for field in report.result.missing_fields() {
            println!("  {}: {}", field, style("no rule matched").dim());
        }
    }

    if args.debug {
        println!();
        println!("{}", style("Raw record:").bold());
        println!("{}", serde_json::to_string_pretty(&report.result)?);
        println!("{}", style("Display view:").bold());
        println!("{}", serde_json::to_string_pretty(&view)?);
        println!(
            "{} Processing time: {}µs",
            style("ℹ").blue(),
            report.processing_time_us
        );
    }

    debug!("Found {}/4 fields", report.result.found_count());

    Ok(())
}

async fn read_input(args: &ExtractArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.input {
        debug!("Reading {}", path.display());
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Input file not found: {}", path.display()));
    }

    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .context("Failed to read stdin")?;
    Ok(buffer)
}

/// Render a record in the requested format.
pub fn format_result(
    result: &ExtractionResult,
    view: &DisplayView,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(view)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(view),
        OutputFormat::Text => Ok(format_text(result, view)),
    }
}

fn format_table(view: &DisplayView) -> String {
    let header = ["Measure", "Estimated", "Actual"];
    let rows: Vec<[&str; 3]> = view
        .rows()
        .map(|(label, row)| [label, row.estimated.as_str(), row.actual.as_str()])
        .collect();

    let mut widths = header.map(measure_text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let line = |cells: [&str; 3]| {
        let padded: Vec<_> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad_str(cell, width, Alignment::Left, None).into_owned())
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };
    let separator = format!(
        "+{}+\n",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut output = String::new();
    output.push_str(&separator);
    output.push_str(&line(header));
    output.push_str(&separator);
    for row in rows {
        output.push_str(&line(row));
    }
    output.push_str(&separator);
    output
}

fn format_csv(view: &DisplayView) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["measure", "estimated", "actual"])?;
    for (label, row) in view.rows() {
        wtr.write_record([label, row.estimated.as_str(), row.actual.as_str()])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult, view: &DisplayView) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Revenue: {} actual, {} estimated\n",
        view.revenue.actual, view.revenue.estimated
    ));
    output.push_str(&format!(
        "EPS:     {} actual, {} estimated\n",
        view.eps.actual, view.eps.estimated
    ));

    let missing: Vec<_> = result.missing_fields().into_iter().map(Field::key).collect();
    if !missing.is_empty() {
        output.push_str(&format!("\nNot found: {}\n", missing.join(", ")));
    }

    output
}
