//! Building and unit identity on expensas statements.

use regex::Regex;

use crate::bill::rules::patterns::{
    BUILDING_CODE, TRAILING_CUIT, TRAILING_CUIT_DOTTED, TRAILING_MAIL, TRAILING_PHONE,
    UNIT_HEADER, WHITESPACE_RUN,
};
use crate::error::{BoletasError, Result};

/// Replacement character some PDF text layers emit for an undecodable "º".
pub const UNDECODED_ORDINAL: char = '\u{FFFD}';

/// Unit code, unit label and owner from the statement header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitInfo {
    pub code: Option<String>,
    pub label: Option<String>,
    pub owner: Option<String>,
}

/// "CODIGO INTERNO: 1234-5".
pub fn extract_building_code(text: &str) -> Option<String> {
    BUILDING_CODE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Compile a label into a pattern tolerant of extra spacing and accents,
/// capturing the rest of the line after it.
pub fn label_pattern(label: &str) -> Result<Regex> {
    let mut pattern = String::from("(?i)");

    for c in label.chars() {
        if c.is_whitespace() {
            pattern.push_str(r"\s+");
            continue;
        }
        match accented_variant(c) {
            Some(accented) => pattern.push_str(&format!("[{c}{accented}]")),
            None => pattern.push_str(&regex::escape(&c.to_string())),
        }
        pattern.push_str(r"\s*");
    }
    pattern.push_str(r":?\s*(.+)");

    Regex::new(&pattern)
        .map_err(|e| BoletasError::Config(format!("invalid address label {label:?}: {e}")))
}

fn accented_variant(c: char) -> Option<char> {
    match c.to_ascii_uppercase() {
        'A' => Some('Á'),
        'E' => Some('É'),
        'I' => Some('Í'),
        'O' => Some('Ó'),
        'U' => Some('Ú'),
        _ => None,
    }
}

/// Building address after the first label (in priority order) found in the text.
pub fn extract_building_address(text: &str, labels: &[Regex]) -> Option<String> {
    labels.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| clean_inline_value(&caps[1]))
    })
}

/// Strip CUIT, mail and phone annotations glued to an inline value, collapse
/// whitespace and trim surrounding punctuation.
pub fn clean_inline_value(value: &str) -> Option<String> {
    let mut cleaned = value.to_string();
    for pattern in [&*TRAILING_CUIT_DOTTED, &*TRAILING_CUIT, &*TRAILING_MAIL, &*TRAILING_PHONE] {
        cleaned = pattern.replace(&cleaned, "").into_owned();
    }

    let cleaned = cleaned.replace(" .", ".");
    let cleaned = WHITESPACE_RUN.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim_matches(|c| matches!(c, ' ' | ':' | '.' | '-'));

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Map the undecoded-ordinal placeholder back to "º".
pub fn remap_undecoded_ordinal(line: &str) -> String {
    line.replace(UNDECODED_ORDINAL, "º")
}

/// First `<code> | <unit> | <owner>` line among the first `limit` non-blank lines.
pub fn extract_unit_info(lines: &[&str], limit: usize) -> UnitInfo {
    lines
        .iter()
        .take(limit)
        .find_map(|line| {
            let sanitized = remap_undecoded_ordinal(line);
            UNIT_HEADER.captures(&sanitized).map(|caps| UnitInfo {
                code: Some(caps[1].trim().to_string()),
                label: clean_inline_value(&caps[2]),
                owner: clean_inline_value(&caps[3]),
            })
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn default_labels() -> Vec<Regex> {
        crate::models::config::ProviderCatalog::default()
            .address_labels
            .iter()
            .map(|l| label_pattern(l).unwrap())
            .collect()
    }

    #[test]
    fn test_building_code() {
        assert_eq!(extract_building_code("Codigo interno: 0452-1"), Some("0452-1".to_string()));
        assert_eq!(extract_building_code("CÓDIGO INTERNO 77"), Some("77".to_string()));
        assert_eq!(extract_building_code("sin codigo"), None);
    }

    #[test]
    fn test_clean_inline_value() {
        assert_eq!(
            clean_inline_value("AV. CORRIENTES 1234   C.U.I.T. 30-1234-5"),
            Some("AV. CORRIENTES 1234".to_string())
        );
        assert_eq!(
            clean_inline_value(" JUAN PEREZ Mail: jp@example.com"),
            Some("JUAN PEREZ".to_string())
        );
        assert_eq!(clean_inline_value("- PISO 5 A -"), Some("PISO 5 A".to_string()));
        assert_eq!(clean_inline_value("CUIT 20-1"), None);
        assert_eq!(clean_inline_value(" : "), None);
    }

    #[test]
    fn test_address_prefers_specific_label() {
        let text = "DOMICILIO: Calle Falsa 1\nDOMICILIO DEL CONSORCIO: Av. Rivadavia 5000 CUIT 30-7";
        assert_eq!(
            extract_building_address(text, &default_labels()),
            Some("Av. Rivadavia 5000".to_string())
        );
    }

    #[test]
    fn test_address_tolerates_spacing_and_accents() {
        let text = "DIRECCIÓN  DEL   EDIFICIO : Güemes 3950 Tel. 4444-5555";
        assert_eq!(
            extract_building_address(text, &default_labels()),
            Some("Güemes 3950".to_string())
        );
    }

    #[test]
    fn test_address_missing() {
        assert_eq!(extract_building_address("nada por aqui", &default_labels()), None);
    }

    #[test]
    fn test_unit_info() {
        let lines = vec!["MIS EXPENSAS", "0101 | PISO 5 A | JUAN PEREZ TEL 1234", "otro"];
        let info = extract_unit_info(&lines, 80);
        assert_eq!(info.code.as_deref(), Some("0101"));
        assert_eq!(info.label.as_deref(), Some("PISO 5 A"));
        assert_eq!(info.owner.as_deref(), Some("JUAN PEREZ"));
    }

    #[test]
    fn test_unit_info_remaps_placeholder() {
        let lines = vec!["202 | 2\u{FFFD} B | MARIA GOMEZ"];
        let info = extract_unit_info(&lines, 80);
        assert_eq!(info.label.as_deref(), Some("2º B"));
    }

    #[test]
    fn test_unit_info_respects_scan_limit() {
        let mut lines = vec!["relleno"; 80];
        lines.push("101 | PISO 5 A | JUAN PEREZ");
        assert_eq!(extract_unit_info(&lines, 80), UnitInfo::default());
        assert_eq!(extract_unit_info(&lines, 81).code.as_deref(), Some("101"));
    }

    #[test]
    fn test_unit_info_rejects_short_codes() {
        let lines = vec!["12 | PISO 5 A | JUAN PEREZ", "101 | sin dueño"];
        assert_eq!(extract_unit_info(&lines, 80), UnitInfo::default());
    }
}
