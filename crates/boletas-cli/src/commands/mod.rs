//! CLI commands and the helpers they share.

pub mod batch;
pub mod compare;
pub mod config;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use boletas_core::models::config::BoletasConfig;
use boletas_core::{format_ars_amount, ParsedBill};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("boletas")
        .join("config.json")
}

/// Explicit config file, else the user config file when present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BoletasConfig> {
    if let Some(path) = config_path {
        return Ok(BoletasConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return Ok(BoletasConfig::from_file(&default_path)?);
    }

    Ok(BoletasConfig::default())
}

/// Read an extracted-text file, trimmed. Empty files are rejected.
pub fn read_input_text(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let text = fs::read_to_string(path)?;
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("No text in input file: {}", path.display());
    }

    Ok(text.to_string())
}

pub fn format_bill(bill: &ParsedBill, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(bill)?),
        OutputFormat::Csv => format_csv(bill),
        OutputFormat::Text => Ok(format_text(bill)),
    }
}

const CSV_HEADER: [&str; 12] = [
    "provider_id",
    "provider_name",
    "category",
    "total_amount",
    "currency",
    "issue_date",
    "due_date",
    "period_start",
    "period_end",
    "unit_code",
    "period",
    "rubros",
];

fn csv_record(bill: &ParsedBill) -> [String; 12] {
    let hoa = bill.hoa_details.as_ref();

    [
        bill.provider_id.as_ref().map(|p| p.to_string()).unwrap_or_default(),
        bill.provider_name.clone().unwrap_or_default(),
        bill.category.map(|c| c.to_string()).unwrap_or_default(),
        bill.total_amount.map(|a| a.to_string()).unwrap_or_default(),
        bill.currency.clone().unwrap_or_default(),
        bill.issue_date.map(|d| d.to_string()).unwrap_or_default(),
        bill.due_date.map(|d| d.to_string()).unwrap_or_default(),
        bill.period_start.map(|d| d.to_string()).unwrap_or_default(),
        bill.period_end.map(|d| d.to_string()).unwrap_or_default(),
        hoa.map(|h| h.unit_code.clone()).unwrap_or_default(),
        hoa.map(|h| h.period_key()).unwrap_or_default(),
        hoa.map(|h| h.rubros.len().to_string()).unwrap_or_default(),
    ]
}

fn format_csv(bill: &ParsedBill) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_record(bill))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(bill: &ParsedBill) -> String {
    let mut output = String::new();
    let currency = bill.currency.as_deref().unwrap_or("");

    output.push_str(&format!(
        "Provider: {}\n",
        bill.provider_name.as_deref().unwrap_or("unknown")
    ));
    output.push_str(&format!(
        "Category: {}\n",
        bill.category.map_or("unknown", |c| c.as_str())
    ));
    if let Some(amount) = bill.total_amount {
        output.push_str(&format!("Total: {} {}\n", format_ars_amount(amount), currency));
    }

    if let Some(issue_date) = bill.issue_date {
        output.push_str(&format!("Issued: {}\n", issue_date));
    }
    if let (Some(start), Some(end)) = (bill.period_start, bill.period_end) {
        output.push_str(&format!("Period: {} - {}\n", start, end));
    }
    if let Some(due_date) = bill.due_date {
        output.push_str(&format!("Payment due: {}\n", due_date));
    }

    if let Some(hoa) = &bill.hoa_details {
        output.push('\n');
        output.push_str(&format!("Unit: {}", hoa.unit_code));
        if let Some(label) = &hoa.unit_label {
            output.push_str(&format!(" ({})", label));
        }
        output.push('\n');
        if let Some(owner) = &hoa.owner_name {
            output.push_str(&format!("Owner: {}\n", owner));
        }
        if let Some(address) = &hoa.building_address {
            output.push_str(&format!("Building: {}\n", address));
        }
        output.push_str(&format!("Period: {}\n", hoa.period_label));
        output.push_str(&format!(
            "To pay: {} {}\n",
            format_ars_amount(hoa.total_to_pay_unit),
            currency
        ));

        if !hoa.rubros.is_empty() {
            output.push_str("\nRubros:\n");
            for rubro in &hoa.rubros {
                output.push_str(&format!(
                    "  {:>2} {:<40} {:>15}\n",
                    rubro.rubro_number,
                    rubro.label,
                    format_ars_amount(rubro.total)
                ));
            }
        }
    }

    output
}
