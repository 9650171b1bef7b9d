//! Period-over-period comparison of expensas statements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};
use crate::models::bill::{HoaDetails, HoaRubro, ParsedBill};

/// Differences within this amount (0.01) count as unchanged.
fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// How a rubro moved between two statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    New,
    Removed,
    Increased,
    Decreased,
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::New => "new",
            DiffStatus::Removed => "removed",
            DiffStatus::Increased => "increased",
            DiffStatus::Decreased => "decreased",
            DiffStatus::Unchanged => "unchanged",
        }
    }
}

/// One rubro compared across two periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubroDiff {
    pub rubro_number: u32,
    pub label: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub current_total: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub previous_total: Option<Decimal>,
    /// Current minus previous, missing totals counted as zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub diff_amount: Decimal,
    /// Percentage change rounded to two places; absent when the previous
    /// total is at or below the tolerance.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub diff_percent: Option<Decimal>,
    pub status: DiffStatus,
}

/// Rubro-level comparison of two statements of the same unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoaComparison {
    pub current_period: String,
    pub previous_period: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_total_to_pay: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_total_to_pay: Decimal,
    /// Sorted by absolute `diff_amount`, largest first.
    pub rubro_diffs: Vec<RubroDiff>,
}

/// Compare the rubros of two statements, matched by rubro number.
pub fn compare_hoa_details(current: &HoaDetails, previous: &HoaDetails) -> HoaComparison {
    let current_rubros = first_by_number(&current.rubros);
    let previous_rubros = first_by_number(&previous.rubros);

    let mut numbers: Vec<u32> = current_rubros.iter().map(|r| r.rubro_number).collect();
    for rubro in &previous_rubros {
        if !numbers.contains(&rubro.rubro_number) {
            numbers.push(rubro.rubro_number);
        }
    }

    let mut rubro_diffs: Vec<RubroDiff> = numbers
        .into_iter()
        .map(|number| {
            let now = current_rubros.iter().find(|r| r.rubro_number == number);
            let before = previous_rubros.iter().find(|r| r.rubro_number == number);
            diff_rubro(number, now.copied(), before.copied())
        })
        .collect();

    rubro_diffs.sort_by(|a, b| b.diff_amount.abs().cmp(&a.diff_amount.abs()));

    HoaComparison {
        current_period: current.period_key(),
        previous_period: previous.period_key(),
        current_total_to_pay: current.total_to_pay_unit,
        previous_total_to_pay: previous.total_to_pay_unit,
        rubro_diffs,
    }
}

/// Compare two parsed bills; both must carry an expensas record.
pub fn compare_bills(current: &ParsedBill, previous: &ParsedBill) -> Result<HoaComparison> {
    let current = current
        .hoa_details
        .as_ref()
        .ok_or_else(|| ExtractionError::MissingField("hoaDetails (current)".to_string()))?;
    let previous = previous
        .hoa_details
        .as_ref()
        .ok_or_else(|| ExtractionError::MissingField("hoaDetails (previous)".to_string()))?;

    Ok(compare_hoa_details(current, previous))
}

fn first_by_number(rubros: &[HoaRubro]) -> Vec<&HoaRubro> {
    let mut unique: Vec<&HoaRubro> = Vec::new();
    for rubro in rubros {
        if !unique.iter().any(|r| r.rubro_number == rubro.rubro_number) {
            unique.push(rubro);
        }
    }
    unique
}

fn diff_rubro(number: u32, current: Option<&HoaRubro>, previous: Option<&HoaRubro>) -> RubroDiff {
    let label = current
        .or(previous)
        .map(|r| r.label.clone())
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| "Sin etiqueta".to_string());

    let current_total = current.map(|r| r.total);
    let previous_total = previous.map(|r| r.total);
    let now = current_total.unwrap_or_default();
    let before = previous_total.unwrap_or_default();
    let diff_amount = now - before;

    let status = match (current, previous) {
        (Some(_), None) => DiffStatus::New,
        (None, Some(_)) => DiffStatus::Removed,
        _ if diff_amount.abs() <= tolerance() => DiffStatus::Unchanged,
        _ if now > before => DiffStatus::Increased,
        _ => DiffStatus::Decreased,
    };

    let diff_percent = (before > tolerance())
        .then(|| (diff_amount / before * Decimal::ONE_HUNDRED).round_dp(2));

    RubroDiff {
        rubro_number: number,
        label,
        current_total,
        previous_total,
        diff_amount,
        diff_percent,
        status,
    }
}
