//! Batch processing command for multiple bill text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use boletas_core::{BillExtractor, BillParser, ExtractionResult};

use super::{format_bill, load_config, read_input_text, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of extracted-text files (e.g. "bills/*.txt")
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of files parsed concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let parser = Arc::new(BillParser::with_config(config)?);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
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
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Parsing is CPU-bound: run it on blocking threads, at most `jobs` at a time.
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let parser = Arc::clone(&parser);

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = process_single_file(&path, &parser);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;

            match outcome {
                Ok(extraction) => FileResult {
                    path,
                    extraction: Some(extraction),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => FileResult {
                    path,
                    extraction: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await?;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                overall_pb.abandon();
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }

        overall_pb.inc(1);
        results.push(result);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(extraction) = &result.extraction {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("bill");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_bill(&extraction.bill, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
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

fn process_single_file(path: &Path, parser: &BillParser) -> anyhow::Result<ExtractionResult> {
    let text = read_input_text(path)?;
    Ok(parser.parse(&text)?)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "provider_id",
        "category",
        "total_amount",
        "currency",
        "due_date",
        "unit_code",
        "period",
        "confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(extraction) = &result.extraction {
            let bill = &extraction.bill;
            let hoa = bill.hoa_details.as_ref();

            wtr.write_record([
                filename,
                "success",
                &bill.provider_id.as_ref().map(|p| p.to_string()).unwrap_or_default(),
                &bill.category.map(|c| c.to_string()).unwrap_or_default(),
                &bill.total_amount.map(|a| a.to_string()).unwrap_or_default(),
                bill.currency.as_deref().unwrap_or(""),
                &bill.due_date.map(|d| d.to_string()).unwrap_or_default(),
                hoa.map_or("", |h| h.unit_code.as_str()),
                &hoa.map(|h| h.period_key()).unwrap_or_default(),
                &format!("{:.2}", extraction.confidence),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
