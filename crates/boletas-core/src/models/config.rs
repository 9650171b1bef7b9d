//! Configuration structures for bill extraction.
//!
//! The provider catalog, expensas markers and address labels are data: they
//! are loaded once and handed to the parser, never mutated while parsing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BoletasError, Result};
use crate::models::bill::ProviderId;

/// Main configuration for the boletas pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoletasConfig {
    /// Extraction tuning.
    pub extraction: ExtractionConfig,

    /// Recognized issuers and markers.
    pub catalog: ProviderCatalog,
}

/// Extraction tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters scanned after a "total to pay" keyword for an amount.
    pub amount_window: usize,

    /// Non-blank lines scanned for the unit / owner header of an expensas statement.
    pub unit_scan_lines: usize,

    /// Currency reported for resolved amounts.
    pub currency: String,

    /// Provider name reported for expensas statements.
    pub hoa_provider_name: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            amount_window: 80,
            unit_scan_lines: 80,
            currency: "ARS".to_string(),
            hoa_provider_name: "Expensas consorcio".to_string(),
        }
    }
}

/// A keyword that identifies an issuer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRule {
    /// Upper-case keyword searched as a substring.
    pub keyword: String,

    /// Issuer reported on a match.
    pub provider_id: ProviderId,

    /// Display name reported on a match.
    pub provider_name: String,

    /// Phrase that must also be present for the keyword to count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
}

impl ProviderRule {
    pub fn new(keyword: &str, provider_id: ProviderId, provider_name: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            provider_id,
            provider_name: provider_name.to_string(),
            requires: None,
        }
    }

    /// Only match when `phrase` also appears in the document.
    pub fn requiring(mut self, phrase: &str) -> Self {
        self.requires = Some(phrase.to_string());
        self
    }
}

/// Ordered lookup tables consulted by the classifier and the expensas extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCatalog {
    /// Provider rules in priority order; the first match wins.
    pub providers: Vec<ProviderRule>,

    /// Phrases that mark a document as an expensas statement.
    pub hoa_markers: Vec<String>,

    /// Building address labels, most specific first.
    pub address_labels: Vec<String>,
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self {
            providers: vec![
                ProviderRule::new("EDESUR", ProviderId::Edesur, "EDESUR S.A."),
                ProviderRule::new("AYSA", ProviderId::Aysa, "AySA"),
                ProviderRule::new("AGUA Y SANEAMIENTO", ProviderId::Aysa, "AySA"),
                ProviderRule::new("METROGAS", ProviderId::Metrogas, "MetroGAS"),
                ProviderRule::new("TELECENTRO", ProviderId::Telecentro, "Telecentro"),
                // "VISA" alone shows up in payment-method footers of unrelated bills.
                ProviderRule::new("VISA", ProviderId::Visa, "Visa").requiring("RESUMEN DE CUENTA"),
                ProviderRule::new("MASTERCARD", ProviderId::Mastercard, "Mastercard"),
            ],
            hoa_markers: vec![
                "MIS EXPENSAS".to_string(),
                "EXPENSAS ORDINARIAS".to_string(),
                "ESTADO DE CUENTAS Y PRORRATEO".to_string(),
            ],
            address_labels: vec![
                "DOMICILIO DEL CONSORCIO".to_string(),
                "DOMICILIO DEL EDIFICIO".to_string(),
                "DIRECCION DEL CONSORCIO".to_string(),
                "DIRECCION DEL EDIFICIO".to_string(),
                "DOMICILIO".to_string(),
                "DIRECCION".to_string(),
            ],
        }
    }
}

impl BoletasConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject configurations the extractors cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.amount_window == 0 {
            return Err(BoletasError::Config(
                "extraction.amount_window must be greater than zero".to_string(),
            ));
        }
        if self.extraction.unit_scan_lines == 0 {
            return Err(BoletasError::Config(
                "extraction.unit_scan_lines must be greater than zero".to_string(),
            ));
        }
        if let Some(rule) = self.catalog.providers.iter().find(|r| r.keyword.trim().is_empty()) {
            return Err(BoletasError::Config(format!(
                "provider rule for {} has an empty keyword",
                rule.provider_id
            )));
        }
        if self.catalog.hoa_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(BoletasError::Config("empty expensas marker".to_string()));
        }
        if self.catalog.address_labels.iter().any(|l| l.trim().is_empty()) {
            return Err(BoletasError::Config("empty building address label".to_string()));
        }
        Ok(())
    }
}
