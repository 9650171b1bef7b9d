//! Billing period of an expensas statement.

use crate::bill::rules::patterns::{month_name, month_number, EXPENSAS_PERIOD, NUMERIC_PERIOD};

/// Resolved statement period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingPeriod {
    /// "MARZO/2024".
    pub label: String,
    pub year: i32,
    pub month: u32,
}

/// Period from "EXPENSAS ... MARZO/2024", falling back to "PERIODO: 03/2024".
pub fn extract_period(text: &str) -> Option<BillingPeriod> {
    let normalized = text.to_uppercase();
    named_period(&normalized).or_else(|| numeric_period(&normalized))
}

fn named_period(text: &str) -> Option<BillingPeriod> {
    let caps = EXPENSAS_PERIOD.captures(text)?;
    let (month_token, year_token) = caps[1].split_once('/')?;

    let month = month_from_token(month_token)?;
    let year = parse_year(year_token)?;
    let name = month_name(month)?;

    Some(BillingPeriod {
        label: format!("{name}/{year}"),
        year,
        month,
    })
}

fn numeric_period(text: &str) -> Option<BillingPeriod> {
    let caps = NUMERIC_PERIOD.captures(text)?;
    let month: u32 = caps[1].parse().ok()?;
    let year = parse_year(&caps[2])?;

    let name = month_name(month)?;

    Some(BillingPeriod {
        label: format!("{name}/{year}"),
        year,
        month,
    })
}

fn parse_year(token: &str) -> Option<i32> {
    token.parse().ok().filter(|year| *year > 0)
}

/// Month number for a token such as "MARZO", "setiembre" or "DICIEMBRE.".
pub fn month_from_token(token: &str) -> Option<u32> {
    let cleaned: String = strip_accents(&token.to_uppercase()).replace('.', "");
    month_number(cleaned.trim())
}

/// Replace Spanish accented letters with their base letter.
pub fn strip_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ñ' => 'N',
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
