//! Bill field extraction module.

pub mod compare;
mod parser;
pub mod rules;

pub use compare::{compare_bills, compare_hoa_details, DiffStatus, HoaComparison, RubroDiff};
pub use parser::{BillParser, ExtractionResult};

use crate::error::Result;
use crate::models::bill::ParsedBill;

/// Trait for bill parsers.
pub trait BillExtractor {
    /// Parse a bill from already-extracted document text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;

    /// Parse a bill and keep only the extracted record.
    fn extract_from_text(&self, text: &str) -> Result<ParsedBill> {
        self.parse(text).map(|r| r.bill)
    }
}
