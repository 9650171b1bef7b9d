//! Expense categories ("rubros") and their totals.

use std::collections::{HashMap, HashSet};

use crate::bill::rules::amounts::AmountExtractor;
use crate::bill::rules::patterns::{RUBRO_HEADER, RUBRO_TOTAL, WHITESPACE_RUN};
use crate::models::bill::HoaRubro;

/// Rubro totals in document order.
///
/// Header lines such as "3 LIMPIEZA" name rubro 3; a later "TOTAL RUBRO 3"
/// line contributes its last amount. Unnamed rubros are labeled
/// "Rubro <n>". Repeated (number, label) pairs keep the first total.
pub fn extract_rubros(lines: &[&str]) -> Vec<HoaRubro> {
    let mut labels: HashMap<u32, String> = HashMap::new();
    let mut rubros = Vec::new();

    for line in lines {
        let normalized = WHITESPACE_RUN.replace_all(line.trim(), " ");

        if let Some(caps) = RUBRO_HEADER.captures(&normalized) {
            if let Ok(number) = caps[1].parse::<u32>() {
                let label = caps[2].trim_matches(|c| matches!(c, ' ' | '.' | ':' | '-'));
                labels.insert(number, label.to_string());
            }
            continue;
        }

        let Some(caps) = RUBRO_TOTAL.captures(line) else {
            continue;
        };
        let Some(number) = caps[1].parse::<u32>().ok().filter(|n| *n > 0) else {
            continue;
        };
        let Some(total) = AmountExtractor::new()
            .skipping_percentages()
            .amounts(line)
            .last()
            .copied()
        else {
            continue;
        };

        let label = labels
            .get(&number)
            .cloned()
            .unwrap_or_else(|| format!("Rubro {number}"));
        rubros.push(HoaRubro {
            rubro_number: number,
            label,
            total,
        });
    }

    let mut seen = HashSet::new();
    rubros.retain(|rubro| seen.insert((rubro.rubro_number, rubro.label.clone())));
    rubros
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn rubro(number: u32, label: &str, total: &str) -> HoaRubro {
        HoaRubro {
            rubro_number: number,
            label: label.to_string(),
            total: Decimal::from_str(total).unwrap(),
        }
    }

    #[test]
    fn test_headers_name_totals() {
        let lines = vec![
            "1 REMUNERACIONES AL PERSONAL",
            "Sueldo encargado 100.000,00",
            "TOTAL RUBRO 1 120.000,00",
            "3   LIMPIEZA .",
            "TOTAL RUBRO 3 5,00 % 8.500,50",
        ];
        assert_eq!(
            extract_rubros(&lines),
            vec![
                rubro(1, "REMUNERACIONES AL PERSONAL", "120000.00"),
                rubro(3, "LIMPIEZA", "8500.50"),
            ]
        );
    }

    #[test]
    fn test_unnamed_rubro_gets_default_label() {
        let lines = vec!["TOTAL RUBRO 7 1.000,00"];
        assert_eq!(extract_rubros(&lines), vec![rubro(7, "Rubro 7", "1000.00")]);
    }

    #[test]
    fn test_duplicate_rubro_keeps_first() {
        let lines = vec![
            "3 LIMPIEZA",
            "TOTAL RUBRO 3 1.234,56",
            "TOTAL RUBRO 3 9.999,99",
        ];
        assert_eq!(extract_rubros(&lines), vec![rubro(3, "LIMPIEZA", "1234.56")]);
    }

    #[test]
    fn test_relabeled_rubro_is_kept_separately() {
        let lines = vec![
            "TOTAL RUBRO 2 10,00",
            "2 SEGUROS",
            "TOTAL RUBRO 2 20,00",
        ];
        assert_eq!(
            extract_rubros(&lines),
            vec![rubro(2, "Rubro 2", "10.00"), rubro(2, "SEGUROS", "20.00")]
        );
    }

    #[test]
    fn test_total_without_amount_is_skipped() {
        let lines = vec!["TOTAL RUBRO 4", "total rubro 5 sin importe"];
        assert!(extract_rubros(&lines).is_empty());
    }

    #[test]
    fn test_mixed_case_header_is_not_a_label() {
        let lines = vec!["4 Mantenimiento", "TOTAL RUBRO 4 50,00"];
        assert_eq!(extract_rubros(&lines), vec![rubro(4, "Rubro 4", "50.00")]);
    }
}
