//! Core library for Argentine bill extraction.
//!
//! This crate provides:
//! - Provider and category classification (Edesur, AySA, MetroGAS, cards, expensas)
//! - Amount normalization for `1.234,56` / `1,234.56` tokens
//! - Issue, due and period date heuristics
//! - Structured extraction of consortium expense statements (expensas)
//! - Period-over-period comparison of expensas rubros

pub mod bill;
pub mod error;
pub mod models;

pub use bill::{
    compare_bills, compare_hoa_details, BillExtractor, BillParser, DiffStatus, ExtractionResult,
    HoaComparison, RubroDiff,
};
pub use bill::rules::format_ars_amount;
pub use error::{BoletasError, ExtractionError, Result};
pub use models::bill::{Category, HoaDetails, HoaRubro, ParsedBill, ProviderId, RubroTotals};
pub use models::config::{BoletasConfig, ExtractionConfig, ProviderCatalog, ProviderRule};
