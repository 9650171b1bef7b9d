//! Process command - extract bill data from a single text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use boletas_core::{BillExtractor, BillParser};

use super::{format_bill, load_config, read_input_text, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file with the text extracted from a bill
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence, warnings and missing fields
    #[arg(long)]
    show_confidence: bool,

    /// Report cross-field validation issues
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let parser = BillParser::with_config(config)?;

    info!("Processing file: {}", args.input.display());
    let text = read_input_text(&args.input)?;
    let result = parser.parse(&text)?;

    if args.validate {
        let issues = result.bill.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_bill(&result.bill, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            result.confidence * 100.0
        );
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
        if !result.missing_fields.is_empty() {
            println!(
                "{} Missing fields: {}",
                style("ℹ").blue(),
                result.missing_fields.join(", ")
            );
        }
        for warning in &result.warnings {
            println!("{} {}", style("!").yellow(), warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
