//! Unit due amounts and building totals.

use rust_decimal::Decimal;

use crate::bill::rules::amounts::AmountExtractor;
use crate::bill::rules::patterns::{PAY_TWICE, TOTAL_BUILDING_EXPENSES};

/// Amounts due at the first and second expiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueAmounts {
    pub first: Option<Decimal>,
    pub second: Option<Decimal>,
}

fn candidates(line: &str) -> Vec<Decimal> {
    AmountExtractor::new().skipping_percentages().amounts(line)
}

fn last_amount(line: &str) -> Option<Decimal> {
    candidates(line).last().copied()
}

/// Due amounts from the "A PAGAR A PAGAR" summary line, with "1ER"/"2DO"
/// lines filling whatever is still missing.
pub fn extract_due_amounts(lines: &[&str]) -> DueAmounts {
    let mut due = DueAmounts::default();

    for line in lines.iter().filter(|line| PAY_TWICE.is_match(line)) {
        let found = candidates(line);
        if found.len() >= 2 {
            due.first = Some(found[0]);
            due.second = Some(found[1]);
            break;
        }
    }

    if due.first.is_none() {
        due.first = marked_amount(lines, "1ER");
    }
    if due.second.is_none() {
        due.second = marked_amount(lines, "2DO");
    }

    due
}

fn marked_amount(lines: &[&str], marker: &str) -> Option<Decimal> {
    lines
        .iter()
        .filter(|line| line.to_uppercase().contains(marker))
        .find(|line| !candidates(line).is_empty())
        .and_then(|line| last_amount(line))
}

/// Last amount on the first "TOTAL A PAGAR" line (spacing ignored) that has one.
pub fn extract_total_to_pay(lines: &[&str]) -> Option<Decimal> {
    lines.iter().find_map(|line| {
        let compact: String = line.split_whitespace().collect::<String>().to_uppercase();
        if compact.contains("TOTALAPAGAR") {
            last_amount(line)
        } else {
            None
        }
    })
}

/// Last amount on the first "TOTAL DE GASTOS" line that has one.
pub fn extract_total_building_expenses(text: &str) -> Option<Decimal> {
    TOTAL_BUILDING_EXPENSES
        .find_iter(text)
        .find_map(|m| last_amount(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_pay_twice_line() {
        let lines = vec!["UF 101", "A PAGAR A PAGAR 1.000,00 500,00"];
        let due = extract_due_amounts(&lines);
        assert_eq!(due.first, dec("1000.00"));
        assert_eq!(due.second, dec("500.00"));
    }

    #[test]
    fn test_pay_twice_ignores_percentages() {
        let lines = vec!["APAGAR A PAGAR 3,50 % 12.345,67 13.000,00"];
        let due = extract_due_amounts(&lines);
        assert_eq!(due.first, dec("12345.67"));
        assert_eq!(due.second, dec("13000.00"));
    }

    #[test]
    fn test_pay_twice_needs_two_amounts() {
        let lines = vec![
            "A PAGAR A PAGAR 1.000,00",
            "A PAGAR A PAGAR 2.000,00 2.100,00",
        ];
        let due = extract_due_amounts(&lines);
        assert_eq!(due.first, dec("2000.00"));
        assert_eq!(due.second, dec("2100.00"));
    }

    #[test]
    fn test_expiry_marker_fallback() {
        let lines = vec![
            "1er vencimiento",
            "1ER VTO 10/04 IMPORTE 100,00 1.800,00",
            "2DO VTO 20/04 1.900,00",
        ];
        let due = extract_due_amounts(&lines);
        assert_eq!(due.first, dec("1800.00"));
        assert_eq!(due.second, dec("1900.00"));
    }

    #[test]
    fn test_missing_due_amounts() {
        assert_eq!(extract_due_amounts(&["nada"]), DueAmounts::default());
    }

    #[test]
    fn test_total_to_pay() {
        let lines = vec![
            "TOTAL A PAGAR",
            "T O T A L  A  P A G A R   $ 1.200,00 1.500,00",
            "TOTAL A PAGAR 9,99",
        ];
        assert_eq!(extract_total_to_pay(&lines), dec("1500.00"));
        assert_eq!(extract_total_to_pay(&["SUBTOTAL 5,00"]), None);
    }

    #[test]
    fn test_total_building_expenses() {
        let text = "TOTAL DE GASTOS\nTotal de gastos del mes 10.000,00 250.000,00\nTOTAL DE GASTOS 1,00";
        assert_eq!(extract_total_building_expenses(text), dec("250000.00"));
        assert_eq!(extract_total_building_expenses("GASTOS 5,00"), None);
    }
}
