//! Bill data models for Argentine utility bills and expensas statements.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parsed bill, the single result of one extraction call.
///
/// Every optional field serializes as `null` when unresolved; nothing is
/// defaulted or skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBill {
    /// The text the fields were extracted from.
    pub raw_text: String,

    /// Detected issuer.
    pub provider_id: Option<ProviderId>,

    /// Display name of the detected issuer.
    pub provider_name: Option<String>,

    /// Billing category.
    pub category: Option<Category>,

    /// Amount to pay.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,

    /// Currency code ("ARS") when an amount or an expensas statement was found.
    pub currency: Option<String>,

    /// Issue date.
    pub issue_date: Option<NaiveDate>,

    /// Payment due date.
    pub due_date: Option<NaiveDate>,

    /// Start of the billed period.
    pub period_start: Option<NaiveDate>,

    /// End of the billed period.
    pub period_end: Option<NaiveDate>,

    /// Structured expensas record.
    pub hoa_details: Option<HoaDetails>,
}

impl ParsedBill {
    /// Create an empty bill for the given text.
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            provider_id: None,
            provider_name: None,
            category: None,
            total_amount: None,
            currency: None,
            issue_date: None,
            due_date: None,
            period_start: None,
            period_end: None,
            hoa_details: None,
        }
    }

    /// Names of the fields that could not be resolved.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("providerId", self.provider_id.is_none()),
            ("category", self.category.is_none()),
            ("totalAmount", self.total_amount.is_none()),
            ("currency", self.currency.is_none()),
            ("issueDate", self.issue_date.is_none()),
            ("dueDate", self.due_date.is_none()),
            ("periodStart", self.period_start.is_none()),
            ("periodEnd", self.period_end.is_none()),
            ("hoaDetails", self.hoa_details.is_none()),
        ];

        checks
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| name)
            .collect()
    }

    /// Check the cross-field invariants and return any issues found.
    ///
    /// A bill categorized as `hoa` without details is accepted: markers can
    /// be present while the record itself is incomplete.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Some(details) = &self.hoa_details {
            if self.category != Some(Category::Hoa) {
                issues.push("Expensas details present on a non-hoa bill".to_string());
            }
            if self.total_amount != Some(details.total_to_pay_unit) {
                issues.push(format!(
                    "Total amount ({:?}) differs from unit total to pay ({})",
                    self.total_amount, details.total_to_pay_unit
                ));
            }
        }

        if self.total_amount.is_some() && self.currency.is_none() {
            issues.push("Amount present without currency".to_string());
        }

        issues
    }
}

/// Known bill issuers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Edesur (electricity).
    Edesur,
    /// AySA (water).
    Aysa,
    /// MetroGAS (gas).
    Metrogas,
    /// Telecentro (internet / cable).
    Telecentro,
    /// Visa credit card statement.
    Visa,
    /// Mastercard credit card statement.
    Mastercard,
    /// Building expensas statement.
    Expensas,
    /// Issuer added through the configured catalog.
    #[serde(untagged)]
    Other(String),
}

impl ProviderId {
    /// Identifier as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            ProviderId::Edesur => "edesur",
            ProviderId::Aysa => "aysa",
            ProviderId::Metrogas => "metrogas",
            ProviderId::Telecentro => "telecentro",
            ProviderId::Visa => "visa",
            ProviderId::Mastercard => "mastercard",
            ProviderId::Expensas => "expensas",
            ProviderId::Other(id) => id,
        }
    }

    /// Billing category implied by the issuer.
    pub fn category(&self) -> Category {
        match self {
            ProviderId::Edesur
            | ProviderId::Aysa
            | ProviderId::Metrogas
            | ProviderId::Telecentro => Category::Service,
            ProviderId::Visa | ProviderId::Mastercard => Category::CreditCard,
            ProviderId::Expensas | ProviderId::Other(_) => Category::Other,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Utility service (electricity, water, gas, internet).
    Service,
    /// Credit card statement.
    CreditCard,
    /// Homeowners association (expensas).
    Hoa,
    /// Anything else.
    Other,
}

impl Category {
    /// Identifier as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Service => "service",
            Category::CreditCard => "credit_card",
            Category::Hoa => "hoa",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured expensas statement for one unit.
///
/// Only built when the unit code, the period and the unit's total to pay
/// were all resolved, so those fields are not optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoaDetails {
    /// Administrator's internal building code.
    pub building_code: Option<String>,

    /// Building street address.
    pub building_address: Option<String>,

    /// Unit code (3-5 digits).
    pub unit_code: String,

    /// Unit description, e.g. "PISO 5 A".
    pub unit_label: Option<String>,

    /// Owner of record.
    pub owner_name: Option<String>,

    /// Human-readable period, e.g. "MARZO/2024".
    pub period_label: String,

    /// Billed year.
    pub period_year: i32,

    /// Billed month (1-12).
    pub period_month: u32,

    /// Amount due by the first due date.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub first_due_amount: Option<Decimal>,

    /// Amount due by the second due date.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub second_due_amount: Option<Decimal>,

    /// Expenses of the whole building (not the unit's share).
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_building_expenses: Option<Decimal>,

    /// The unit's payable amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_to_pay_unit: Decimal,

    /// Expense categories in document order.
    #[serde(default)]
    pub rubros: Vec<HoaRubro>,
}

impl HoaDetails {
    /// Sortable period key, e.g. "2024-03".
    pub fn period_key(&self) -> String {
        format!("{}-{:02}", self.period_year, self.period_month)
    }

    /// Sum of the rubro subtotals.
    pub fn rubro_totals(&self) -> RubroTotals {
        if self.rubros.is_empty() {
            return RubroTotals::default();
        }

        RubroTotals {
            rubros_total: Some(self.rubros.iter().map(|r| r.total).sum()),
            rubros_with_totals: self.rubros.len(),
        }
    }
}

/// One expense category line of an expensas statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoaRubro {
    /// Rubro number as printed.
    pub rubro_number: u32,

    /// Header label, or "Rubro {n}" when no header was found.
    pub label: String,

    /// Subtotal of the rubro.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Aggregate over the rubros of one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubroTotals {
    /// Sum of all rubro subtotals, absent when there are no rubros.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rubros_total: Option<Decimal>,

    /// Number of rubros that contributed to the sum.
    pub rubros_with_totals: usize,
}
