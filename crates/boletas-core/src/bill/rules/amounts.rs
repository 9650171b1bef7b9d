//! Amount extraction for Argentine bills.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::patterns::{AMOUNT_PATTERN, TOTAL_TO_PAY};
use super::{ExtractionMatch, FieldExtractor};

/// Amount token extractor.
pub struct AmountExtractor {
    skip_percentages: bool,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            skip_percentages: false,
        }
    }

    /// Ignore tokens followed by a `%` sign (prorrateo percentages, not money).
    pub fn skipping_percentages(mut self) -> Self {
        self.skip_percentages = true;
        self
    }

    /// Parsed amounts in order of appearance.
    pub fn amounts(&self, text: &str) -> Vec<Decimal> {
        self.extract_all(text).into_iter().map(|m| m.value).collect()
    }

    fn candidates<'t>(&self, text: &'t str) -> impl Iterator<Item = regex::Match<'t>> {
        AMOUNT_PATTERN
            .find_iter(text)
            .filter(move |m| !(self.skip_percentages && text[m.end()..].trim_start().starts_with('%')))
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.candidates(text)
            .filter_map(|m| {
                parse_monetary_value(m.as_str()).map(|amount| ExtractionMatch::new(amount, m.as_str()))
            })
            .collect()
    }
}

/// Normalize a raw amount token ("$ 1.234,56", "1,234.56", "-50,00") to a decimal.
///
/// Whichever of `,` and `.` occurs last is the decimal separator; the other
/// one groups thousands. Returns `None` for empty or unparseable input.
pub fn parse_monetary_value(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let separator = match (unsigned.rfind(','), unsigned.rfind('.')) {
        (Some(c), Some(d)) => Some(if c > d { c } else { d }),
        (Some(c), None) => Some(c),
        (None, Some(d)) => Some(d),
        (None, None) => None,
    };

    let normalized = match separator {
        Some(pos) => {
            let integer: String = unsigned[..pos].chars().filter(|c| !matches!(c, ',' | '.')).collect();
            let fraction = &unsigned[pos + 1..];
            format!(
                "{}.{}",
                if integer.is_empty() { "0" } else { integer.as_str() },
                if fraction.is_empty() { "00" } else { fraction }
            )
        }
        None => unsigned.to_string(),
    };

    let value = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -value } else { value })
}

/// Find the "total to pay" amount of a non-expensas bill.
///
/// Each keyword match (in document order) gets `window` characters of
/// lookahead for an amount token. Without a hit, the first amount token of
/// the whole document is used.
pub fn extract_total_amount(text: &str, window: usize) -> Option<Decimal> {
    let extractor = AmountExtractor::new();

    for keyword in TOTAL_TO_PAY.find_iter(text) {
        let tail = &text[keyword.end()..];
        let end = tail
            .char_indices()
            .nth(window)
            .map_or(text.len(), |(i, _)| keyword.end() + i);

        if let Some(found) = extractor.extract(&text[keyword.start()..end]) {
            debug!("Total amount {} near \"{}\"", found.source, keyword.as_str());
            return Some(found.value);
        }
    }

    debug!("No amount near a total keyword, using first amount in document");
    extractor.extract(text).map(|found| found.value)
}

/// Format amount in Argentine style (1.234,56).
pub fn format_ars_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}{},{}", sign, formatted, decimal_part)
}
