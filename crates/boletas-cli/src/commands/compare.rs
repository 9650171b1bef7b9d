//! Compare command - rubro-by-rubro diff of two expensas statements.

use std::path::PathBuf;

use clap::Args;
use console::style;

use boletas_core::{compare_bills, format_ars_amount, BillExtractor, BillParser, DiffStatus, HoaComparison};

use super::{load_config, read_input_text};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Text of the current statement
    #[arg(required = true)]
    current: PathBuf,

    /// Text of the previous statement
    #[arg(required = true)]
    previous: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: CompareFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CompareFormat {
    /// JSON output
    Json,
    /// Table
    Text,
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let parser = BillParser::with_config(load_config(config_path)?)?;

    let current = parser.extract_from_text(&read_input_text(&args.current)?)?;
    let previous = parser.extract_from_text(&read_input_text(&args.previous)?)?;

    let comparison = compare_bills(&current, &previous)?;

    match args.format {
        CompareFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        CompareFormat::Text => print!("{}", format_comparison(&comparison)),
    }

    Ok(())
}

fn format_comparison(comparison: &HoaComparison) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} vs {}\n",
        comparison.current_period, comparison.previous_period
    ));
    output.push_str(&format!(
        "To pay: {} (was {})\n\n",
        format_ars_amount(comparison.current_total_to_pay),
        format_ars_amount(comparison.previous_total_to_pay)
    ));

    if comparison.rubro_diffs.is_empty() {
        output.push_str("No rubros found in either statement.\n");
        return output;
    }

    for diff in &comparison.rubro_diffs {
        let status = match diff.status {
            DiffStatus::Increased | DiffStatus::New => style(diff.status.as_str()).red(),
            DiffStatus::Decreased | DiffStatus::Removed => style(diff.status.as_str()).green(),
            DiffStatus::Unchanged => style(diff.status.as_str()).dim(),
        };
        let percent = diff
            .diff_percent
            .map(|p| format!(" ({}%)", p))
            .unwrap_or_default();

        output.push_str(&format!(
            "  {:>2} {:<40} {:>15} {}{}\n",
            diff.rubro_number,
            diff.label,
            format_ars_amount(diff.diff_amount),
            status,
            percent
        ));
    }

    output
}
