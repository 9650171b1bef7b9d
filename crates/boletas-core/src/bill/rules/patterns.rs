//! Common regex patterns and lookup tables for Argentine bill extraction.
//!
//! Issuer keywords and expensas markers are user-extensible and live in
//! [`ProviderCatalog`](crate::models::config::ProviderCatalog); everything
//! here is fixed.

use lazy_static::lazy_static;
use regex::Regex;

/// Spanish month names, including the "SETIEMBRE" spelling.
pub const SPANISH_MONTHS: &[(&str, u32)] = &[
    ("ENERO", 1),
    ("FEBRERO", 2),
    ("MARZO", 3),
    ("ABRIL", 4),
    ("MAYO", 5),
    ("JUNIO", 6),
    ("JULIO", 7),
    ("AGOSTO", 8),
    ("SEPTIEMBRE", 9),
    ("SETIEMBRE", 9),
    ("OCTUBRE", 10),
    ("NOVIEMBRE", 11),
    ("DICIEMBRE", 12),
];

/// Canonical month names indexed by month number - 1.
pub const MONTH_NAMES: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// Month number for an upper-case, accent-free month name.
pub fn month_number(name: &str) -> Option<u32> {
    SPANISH_MONTHS
        .iter()
        .find(|(month, _)| *month == name)
        .map(|(_, number)| *number)
}

/// Canonical name for a month number.
pub fn month_name(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

lazy_static! {
    // Amount token: grouped digits with a mandatory two-digit fraction
    // (1.234,56 / 1,234.56 / 1234,56)
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"(?:\d{1,3}(?:[.,]\d{3})+|\d+)(?:[.,]\d{2})"
    ).unwrap();

    // "Total to pay" keywords, tolerating one word between TOTAL and PAGAR/ABONAR
    pub static ref TOTAL_TO_PAY: Regex = Regex::new(
        r"(?i)(?:TOTAL\s*A\s+PAGAR|TOTAL\s*PAGAR|TOTAL\s*A\s+ABONAR|IMPORTE\s+TOTAL|TOTAL\s+\w*\s+PAGAR|TOTAL\s+\w*\s+ABONAR)"
    ).unwrap();

    // dd/mm/yyyy
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{2})/(\d{2})/(\d{4})\b"
    ).unwrap();

    // MetroGAS labeled dates
    pub static ref METROGAS_DUE: Regex = Regex::new(
        r"(?is)FECHA\s+DE\s+VENCIMIENTO[:\s]*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref METROGAS_DUE_BEFORE_LABEL: Regex = Regex::new(
        r"(?is)(\d{2}/\d{2}/\d{4})\s*(?:\r?\n)?\s*FECHA\s+DE\s+VENCIMIENTO"
    ).unwrap();

    pub static ref METROGAS_ISSUE: Regex = Regex::new(
        r"(?is)FECHA\s+DE\s+EMISI[ÓO]N[:\s]*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref METROGAS_PERIOD: Regex = Regex::new(
        r"(?is)PER[IÍ]ODO\s+DE\s+LIQUIDACI[ÓO]N[:\s]*(\d{2}/\d{2}/\d{4})\s*A\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Edesur "1º Vencimiento:" / "2º Vencimiento:"
    pub static ref EDESUR_FIRST_DUE: Regex = Regex::new(
        r"(?is)1[º°]\s*Vencimiento:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref EDESUR_SECOND_DUE: Regex = Regex::new(
        r"(?is)2[º°]\s*Vencimiento:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Expensas building identity
    pub static ref BUILDING_CODE: Regex = Regex::new(
        r"(?i)C[OÓ]DIGO\s+INTERNO[:\s]+([0-9\-]+)"
    ).unwrap();

    // "<code> | <unit label> | <owner>"
    pub static ref UNIT_HEADER: Regex = Regex::new(
        r"^(\d{3,5})\s*\|\s*([^|]+)\|\s*([^|]+)$"
    ).unwrap();

    // Trailing metadata glued to inline values
    pub static ref TRAILING_CUIT_DOTTED: Regex = Regex::new(
        r"(?i)C\s*\.\s*U\s*\.\s*I\s*\.\s*T\s*\..*"
    ).unwrap();

    pub static ref TRAILING_CUIT: Regex = Regex::new(r"(?i)CUIT.*").unwrap();

    pub static ref TRAILING_MAIL: Regex = Regex::new(r"(?i)MAIL.*").unwrap();

    pub static ref TRAILING_PHONE: Regex = Regex::new(r"(?i)TEL.*").unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Expensas period: "EXPENSAS ... MARZO/2024"
    pub static ref EXPENSAS_PERIOD: Regex = Regex::new(
        r"(?i)EXPENSAS[^\n]{0,120}?([A-ZÁÉÍÓÚÜÑ]+/\d{4})"
    ).unwrap();

    // "PERIODO: 03/2024"
    pub static ref NUMERIC_PERIOD: Regex = Regex::new(
        r"(?i)PER[IÍ]ODO[:\s]+(\d{1,2})/(\d{4})"
    ).unwrap();

    // Expensas due amounts
    pub static ref PAY_TWICE: Regex = Regex::new(
        r"(?i)A\s*PAGAR\s+A\s*PAGAR"
    ).unwrap();

    pub static ref TOTAL_BUILDING_EXPENSES: Regex = Regex::new(
        r"(?i)TOTAL\s+DE\s+GASTOS.*"
    ).unwrap();

    // Rubros: "3 LIMPIEZA" header lines and "TOTAL RUBRO 3" lines
    pub static ref RUBRO_HEADER: Regex = Regex::new(
        r"^(\d{1,2})\s+([A-ZÁÉÍÓÚÜÑ0-9 .,'/-]+)$"
    ).unwrap();

    pub static ref RUBRO_TOTAL: Regex = Regex::new(
        r"(?i)TOTAL\s+RUBRO\s+(\d+)"
    ).unwrap();
}
