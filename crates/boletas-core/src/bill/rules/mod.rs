//! Rule-based field extractors for Argentine bills.

pub mod amounts;
pub mod dates;
pub mod hoa;
pub mod patterns;
pub mod provider;

pub use amounts::{extract_total_amount, format_ars_amount, parse_monetary_value, AmountExtractor};
pub use dates::{extract_dates, BillDates, DateExtractor};
pub use hoa::{contains_hoa_markers, HoaExtractor};
pub use provider::{detect_category, detect_provider, DetectedProvider};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in text, with the text it was read from.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
        }
    }
}
