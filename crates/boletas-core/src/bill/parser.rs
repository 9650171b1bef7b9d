//! Rule-based bill parser: classifies the document, runs the expensas or
//! generic amount extraction, then the date heuristics.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ExtractionError, Result};
use crate::models::bill::{ParsedBill, ProviderId};
use crate::models::config::BoletasConfig;

use super::rules::{
    contains_hoa_markers, detect_category, detect_provider, extract_dates, extract_total_amount,
    HoaExtractor,
};
use super::BillExtractor;

/// Result of bill extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted bill.
    pub bill: ParsedBill,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Names of the bill fields left null.
    pub missing_fields: Vec<String>,
    /// Overall confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Bill parser over an immutable configuration.
pub struct BillParser {
    config: BoletasConfig,
    hoa: HoaExtractor,
}

impl BillParser {
    /// Create a parser with the built-in catalog.
    pub fn new() -> Result<Self> {
        Self::with_config(BoletasConfig::default())
    }

    /// Create a parser with a custom configuration.
    pub fn with_config(config: BoletasConfig) -> Result<Self> {
        config.validate()?;
        let hoa = HoaExtractor::new(&config)?;
        Ok(Self { config, hoa })
    }

    /// Extract every field from already-trimmed text.
    ///
    /// Never fails: unresolved fields stay `None`.
    pub fn extract(&self, text: &str) -> ParsedBill {
        self.extract_document(text).0
    }

    /// The bill plus whether expensas markers were found.
    fn extract_document(&self, text: &str) -> (ParsedBill, bool) {
        let extraction = &self.config.extraction;

        let hoa_detected = contains_hoa_markers(text, &self.config.catalog.hoa_markers);
        let hoa_details = if hoa_detected { self.hoa.extract(text) } else { None };

        let (provider_id, provider_name) = if hoa_detected {
            (Some(ProviderId::Expensas), Some(extraction.hoa_provider_name.clone()))
        } else {
            match detect_provider(text, &self.config.catalog) {
                Some(found) => (Some(found.id), Some(found.name)),
                None => (None, None),
            }
        };

        let category = detect_category(provider_id.as_ref(), hoa_detected);

        let total_amount = match &hoa_details {
            Some(details) => Some(details.total_to_pay_unit),
            None => extract_total_amount(text, extraction.amount_window),
        };
        let currency = (total_amount.is_some() || hoa_detected).then(|| extraction.currency.clone());

        let dates = extract_dates(text, provider_id.as_ref());

        info!(
            "Parsed document provider={} category={} amount={} due={}",
            provider_id.as_ref().map_or("none", |p| p.as_str()),
            category,
            total_amount.map_or_else(|| "none".to_string(), |a| a.to_string()),
            dates.due_date.map_or_else(|| "none".to_string(), |d| d.to_string()),
        );

        let bill = ParsedBill {
            raw_text: text.to_string(),
            provider_id,
            provider_name,
            category: Some(category),
            total_amount,
            currency,
            issue_date: dates.issue_date,
            due_date: dates.due_date,
            period_start: dates.period_start,
            period_end: dates.period_end,
            hoa_details,
        };

        (bill, hoa_detected)
    }
}

impl BillExtractor for BillParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();

        let text = text.trim();
        if text.is_empty() {
            return Err(ExtractionError::EmptyInput.into());
        }

        let (bill, hoa_detected) = self.extract_document(text);

        let mut warnings = Vec::new();
        let mut confidence = 1.0f32;

        if bill.provider_id.is_none() {
            warnings.push("Could not detect provider".to_string());
            confidence -= 0.25;
        }
        if bill.total_amount.is_none() {
            warnings.push("Could not extract total amount".to_string());
            confidence -= 0.3;
        }
        if bill.due_date.is_none() {
            warnings.push("Could not extract due date".to_string());
            confidence -= 0.2;
        }
        if hoa_detected && bill.hoa_details.is_none() {
            warnings.push("Expensas markers found but the statement record is incomplete".to_string());
            confidence -= 0.25;
        }

        warnings.extend(bill.validate());

        let missing_fields = bill
            .missing_fields()
            .into_iter()
            .map(String::from)
            .collect();
        let confidence = confidence.clamp(0.0, 1.0);

        debug!(
            "Extracted {} bill with confidence {:.2}",
            bill.category.map_or("unknown", |c| c.as_str()),
            confidence
        );

        Ok(ExtractionResult {
            bill,
            warnings,
            missing_fields,
            confidence,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
