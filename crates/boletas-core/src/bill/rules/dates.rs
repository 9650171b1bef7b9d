//! Date extraction for Argentine bills.

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use super::patterns::{
    DATE_DMY, EDESUR_FIRST_DUE, EDESUR_SECOND_DUE, METROGAS_DUE, METROGAS_DUE_BEFORE_LABEL,
    METROGAS_ISSUE, METROGAS_PERIOD,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::bill::ProviderId;

/// dd/mm/yyyy date extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for full_match in DATE_DMY.find_iter(text) {
            // Impossible calendar dates (31/02/2024) are skipped, not reported.
            if let Some(date) = parse_dmy(full_match.as_str()) {
                results.push(ExtractionMatch::new(date, full_match.as_str()));
            }
        }

        results
    }
}

/// Dates of a bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillDates {
    /// Issue (emission) date.
    pub issue_date: Option<NaiveDate>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Start of the billed period.
    pub period_start: Option<NaiveDate>,
    /// End of the billed period.
    pub period_end: Option<NaiveDate>,
}

impl BillDates {
    /// Overwrite fields with the ones resolved in `labeled`; absent labeled
    /// fields keep the current value.
    pub fn overridden_by(self, labeled: BillDates) -> BillDates {
        BillDates {
            issue_date: labeled.issue_date.or(self.issue_date),
            due_date: labeled.due_date.or(self.due_date),
            period_start: labeled.period_start.or(self.period_start),
            period_end: labeled.period_end.or(self.period_end),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == BillDates::default()
    }
}

/// Extract issue, due and period dates.
///
/// Positional guesses over every date in the document form the base;
/// provider-specific labeled fields replace them where found. A document
/// without any parseable date yields no dates at all.
pub fn extract_dates(text: &str, provider: Option<&ProviderId>) -> BillDates {
    let positional = positional_dates(text);
    if positional.is_empty() {
        debug!("No dd/mm/yyyy dates found");
        return BillDates::default();
    }

    positional.overridden_by(labeled_dates(text, provider))
}

/// Chronological guesses: earliest starts the period, latest is the due
/// date, index `count / 2` is the issue date and the second latest ends the
/// period.
pub fn positional_dates(text: &str) -> BillDates {
    let mut found: Vec<NaiveDate> = DateExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect();

    if found.is_empty() {
        return BillDates::default();
    }

    found.sort();
    let count = found.len();

    BillDates {
        issue_date: Some(found[count / 2]),
        due_date: Some(found[count - 1]),
        period_start: Some(found[0]),
        period_end: count.checked_sub(2).map(|i| found[i]),
    }
}

/// Labeled dates for issuers whose layout is known.
pub fn labeled_dates(text: &str, provider: Option<&ProviderId>) -> BillDates {
    let mut dates = BillDates::default();

    match provider {
        Some(ProviderId::Metrogas) => {
            let due = capture(&METROGAS_DUE, text).or_else(|| capture(&METROGAS_DUE_BEFORE_LABEL, text));
            dates.due_date = due.and_then(parse_dmy);
            dates.issue_date = capture(&METROGAS_ISSUE, text).and_then(parse_dmy);

            if let Some(caps) = METROGAS_PERIOD.captures(text) {
                dates.period_start = parse_dmy(&caps[1]);
                dates.period_end = parse_dmy(&caps[2]);
            }
        }
        Some(ProviderId::Edesur) => {
            let due = capture(&EDESUR_FIRST_DUE, text).or_else(|| capture(&EDESUR_SECOND_DUE, text));
            dates.due_date = due.and_then(parse_dmy);
        }
        _ => {}
    }

    dates
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a `dd/mm/yyyy` string.
pub fn parse_dmy(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y").ok()
}
