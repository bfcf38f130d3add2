//! Batch processing command for multiple text files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use futures_util::{stream, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use earnings_core::{DisplayView, ExtractionResult, Field, FinancialTextParser, ParseReport};

use super::config::load_config;
use super::extract::{format_result, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<ParseReport>,
    error: Option<String>,
    processed_at: DateTime<Utc>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "text" | "md")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        tokio::fs::create_dir_all(output_dir).await?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = Arc::new(FinancialTextParser::from_config(&config.extraction));

    let results: Vec<ProcessResult> = stream::iter(files)
        .map(|path| {
            let parser = Arc::clone(&parser);
            async move {
                let outcome = process_single_file(&path, parser).await;
                let processed_at = Utc::now();
                match outcome {
                    Ok(report) => ProcessResult {
                        path,
                        report: Some(report),
                        error: None,
                        processed_at,
                    },
                    Err(e) => ProcessResult {
                        path,
                        report: None,
                        error: Some(format!("{:#}", e)),
                        processed_at,
                    },
                }
            }
        })
        .buffered(args.jobs.max(1))
        .inspect(|_| progress.inc(1))
        .collect()
        .await;

    progress.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.report.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(first) = failed.first() {
        if !args.continue_on_error {
            let message = first.error.as_deref().unwrap_or("unknown error");
            error!("Failed to process {}: {}", first.path.display(), message);
            anyhow::bail!("Processing failed for {}: {}", first.path.display(), message);
        }
        for result in &failed {
            warn!(
                "Failed to process {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    for result in &successful {
        if let (Some(report), Some(output_dir)) = (&result.report, &args.output_dir) {
            let output_path = output_file_path(output_dir, &result.path, format);
            let view = DisplayView::with_sentinel(&report.result, &config.display.not_available);
            let content = format_result(&report.result, &view, format)?;

            tokio::fs::write(&output_path, content)
                .await
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn process_single_file(
    path: &Path,
    parser: Arc<FinancialTextParser>,
) -> anyhow::Result<ParseReport> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if text.trim().is_empty() {
        anyhow::bail!("File contains no text");
    }

    let report = tokio::task::spawn_blocking(move || parser.parse(&text)).await?;
    debug!(
        "{}: {}/4 fields in {}µs",
        path.display(),
        report.result.found_count(),
        report.processing_time_us
    );

    Ok(report)
}

fn output_file_path(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("extraction");
    output_dir.join(format!("{}.{}", stem, format.extension()))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(Field::ALL.map(Field::key));
    header.extend(["fields_found", "processing_time_us", "processed_at", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let processed_at = result.processed_at.to_rfc3339();

        let mut record = vec![filename.to_string()];
        match &result.report {
            Some(report) => {
                record.push("success".to_string());
                record.extend(summary_fields(&report.result));
                record.push(report.result.found_count().to_string());
                record.push(report.processing_time_us.to_string());
                record.push(processed_at);
                record.push(String::new());
            }
            None => {
                record.push("error".to_string());
                record.extend(Field::ALL.map(|_| String::new()));
                record.push(String::new());
                record.push(String::new());
                record.push(processed_at);
                record.push(result.error.clone().unwrap_or_default());
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn summary_fields(result: &ExtractionResult) -> [String; 4] {
    Field::ALL.map(|field| result.get(field).unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_path() {
        let path = output_file_path(Path::new("out"), Path::new("in/q3.txt"), OutputFormat::Json);
        assert_eq!(path, PathBuf::from("out/q3.json"));
    }

    #[test]
    fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let parser = FinancialTextParser::new();
        let results = vec![
            ProcessResult {
                path: PathBuf::from("q1.txt"),
                report: Some(parser.parse("EPS was $1.10 actual versus $1.05 estimated")),
                error: None,
                processed_at: Utc::now(),
            },
            ProcessResult {
                path: PathBuf::from("empty.txt"),
                report: None,
                error: Some("File contains no text".to_string()),
                processed_at: Utc::now(),
            },
        ];

        write_summary(&path, &results).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "q1.txt");
        assert_eq!(&rows[0][4], "$1.10");
        assert_eq!(&rows[0][5], "$1.05");
        assert_eq!(&rows[0][6], "2");
        assert_eq!(&rows[1][1], "error");
        assert_eq!(&rows[1][9], "File contains no text");
    }
}
