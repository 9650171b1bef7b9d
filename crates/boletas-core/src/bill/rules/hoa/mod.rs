//! Structured extraction for consortium expense statements (expensas).
//!
//! A statement only yields [`HoaDetails`] when the unit code, the billing
//! period and the amount to pay could all be resolved. Everything else is
//! best effort.

pub mod amounts;
pub mod identity;
pub mod period;
pub mod rubros;

use regex::Regex;
use tracing::debug;

pub use amounts::{extract_due_amounts, extract_total_building_expenses, extract_total_to_pay, DueAmounts};
pub use identity::{extract_building_address, extract_building_code, extract_unit_info, UnitInfo};
pub use period::{extract_period, BillingPeriod};
pub use rubros::extract_rubros;

use crate::error::Result;
use crate::models::bill::HoaDetails;
use crate::models::config::BoletasConfig;

/// Whether any expensas marker appears in the text (case-insensitive).
pub fn contains_hoa_markers(text: &str, markers: &[String]) -> bool {
    let normalized = text.to_uppercase();
    markers
        .iter()
        .any(|marker| normalized.contains(&marker.to_uppercase()))
}

/// Trimmed, non-blank lines. Carriage returns, form feeds and Unicode line
/// separators break lines too.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Expensas statement extractor with precompiled address labels.
pub struct HoaExtractor {
    address_labels: Vec<Regex>,
    unit_scan_lines: usize,
}

impl HoaExtractor {
    pub fn new(config: &BoletasConfig) -> Result<Self> {
        let address_labels = config
            .catalog
            .address_labels
            .iter()
            .map(|label| identity::label_pattern(label))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            address_labels,
            unit_scan_lines: config.extraction.unit_scan_lines,
        })
    }

    /// Extract the statement details, or `None` when the unit code, the
    /// period or the amount to pay is missing.
    pub fn extract(&self, text: &str) -> Option<HoaDetails> {
        let lines = content_lines(text);

        let unit = extract_unit_info(&lines, self.unit_scan_lines);
        let period = extract_period(text);
        let due = extract_due_amounts(&lines);
        let total_to_pay = extract_total_to_pay(&lines).or(due.first);

        let (Some(unit_code), Some(period), Some(total_to_pay_unit)) = (unit.code, period, total_to_pay)
        else {
            debug!("Expensas statement withheld: unit code, period or amount to pay not found");
            return None;
        };

        Some(HoaDetails {
            building_code: extract_building_code(text),
            building_address: extract_building_address(text, &self.address_labels),
            unit_code,
            unit_label: unit.label,
            owner_name: unit.owner,
            period_label: period.label,
            period_year: period.year,
            period_month: period.month,
            first_due_amount: due.first,
            second_due_amount: due.second,
            total_building_expenses: extract_total_building_expenses(text),
            total_to_pay_unit,
            rubros: extract_rubros(&lines),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn extractor() -> HoaExtractor {
        HoaExtractor::new(&BoletasConfig::default()).unwrap()
    }

    const STATEMENT: &str = r#"
        ADMINISTRACION LOPEZ - MIS EXPENSAS
        CODIGO INTERNO: 0452
        DOMICILIO DEL CONSORCIO: AV. CORRIENTES 1234 C.U.I.T. 30-11111111-1

        101 | PISO 5 A | JUAN PEREZ

        EXPENSAS ORDINARIAS MARZO/2024

        1 REMUNERACIONES
        TOTAL RUBRO 1 200.000,00
        3 LIMPIEZA
        TOTAL RUBRO 3 50.000,00
        TOTAL DE GASTOS 250.000,00

        UF  %PRORRATEO  1ER VTO  2DO VTO
        A PAGAR A PAGAR 2,50 % 1.000,00 1.100,00
        TOTAL A PAGAR 1.500,00
    "#;

    #[test]
    fn test_contains_hoa_markers() {
        let markers = BoletasConfig::default().catalog.hoa_markers;
        assert!(contains_hoa_markers("Estado de cuentas y prorrateo", &markers));
        assert!(contains_hoa_markers("mis expensas", &markers));
        assert!(!contains_hoa_markers("EXPENSAS", &markers));
    }

    #[test]
    fn test_content_lines() {
        assert_eq!(content_lines("  a \n\n \t\n b"), vec!["a", "b"]);
        assert_eq!(
            content_lines("TOTAL RUBRO 1 100,00\x0c2 LIMPIEZA\r\nfin\rx\u{2028}y"),
            vec!["TOTAL RUBRO 1 100,00", "2 LIMPIEZA", "fin", "x", "y"]
        );
    }

    #[test]
    fn test_full_statement() {
        let details = extractor().extract(STATEMENT).unwrap();

        assert_eq!(details.building_code.as_deref(), Some("0452"));
        assert_eq!(details.building_address.as_deref(), Some("AV. CORRIENTES 1234"));
        assert_eq!(details.unit_code, "101");
        assert_eq!(details.unit_label.as_deref(), Some("PISO 5 A"));
        assert_eq!(details.owner_name.as_deref(), Some("JUAN PEREZ"));
        assert_eq!(details.period_label, "MARZO/2024");
        assert_eq!(details.period_key(), "2024-03");
        assert_eq!(details.first_due_amount, Some(dec("1000.00")));
        assert_eq!(details.second_due_amount, Some(dec("1100.00")));
        assert_eq!(details.total_building_expenses, Some(dec("250000.00")));
        assert_eq!(details.total_to_pay_unit, dec("1500.00"));
        assert_eq!(details.rubros.len(), 2);
        assert_eq!(details.rubros[1].label, "LIMPIEZA");
    }

    #[test]
    fn test_page_break_separates_lines() {
        let text = "101 | PISO 5 A | JUAN PEREZ\r\nEXPENSAS MARZO/2024\r\n\
                    1 SUELDOS\x0cTOTAL RUBRO 1 100.000,00\x0cTOTAL A PAGAR 1.500,00";
        let details = extractor().extract(text).unwrap();

        assert_eq!(details.unit_code, "101");
        assert_eq!(details.rubros.len(), 1);
        assert_eq!(details.rubros[0].label, "SUELDOS");
        assert_eq!(details.rubros[0].total, dec("100000.00"));
        assert_eq!(details.total_to_pay_unit, dec("1500.00"));
    }

    #[test]
    fn test_first_due_stands_in_for_total() {
        let text = "101 | PISO 1 | ANA\nEXPENSAS ABRIL/2024\nA PAGAR A PAGAR 900,00 950,00";
        let details = extractor().extract(text).unwrap();
        assert_eq!(details.total_to_pay_unit, dec("900.00"));
        assert!(details.rubros.is_empty());
    }

    #[test]
    fn test_withheld_without_unit_code() {
        let text = "EXPENSAS MARZO/2024\nTOTAL A PAGAR 1.500,00";
        assert!(extractor().extract(text).is_none());
    }

    #[test]
    fn test_withheld_without_period() {
        let text = "101 | PISO 5 A | JUAN PEREZ\nTOTAL A PAGAR 1.500,00";
        assert!(extractor().extract(text).is_none());
    }

    #[test]
    fn test_withheld_without_amount() {
        let text = "101 | PISO 5 A | JUAN PEREZ\nEXPENSAS MARZO/2024";
        assert!(extractor().extract(text).is_none());
    }

    #[test]
    fn test_custom_address_label() {
        let mut config = BoletasConfig::default();
        config.catalog.address_labels = vec!["UBICACION".to_string()];
        let text = "101 | PISO 1 | ANA\nUbicación: Lavalle 100\nEXPENSAS ABRIL/2024\nTOTAL A PAGAR 10,00";

        let details = HoaExtractor::new(&config).unwrap().extract(text).unwrap();
        assert_eq!(details.building_address.as_deref(), Some("Lavalle 100"));
    }
}
