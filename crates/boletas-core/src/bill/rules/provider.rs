//! Issuer and category classification.

use crate::models::bill::{Category, ProviderId};
use crate::models::config::ProviderCatalog;

/// Issuer resolved from the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedProvider {
    pub id: ProviderId,
    pub name: String,
}

/// Find the first catalog rule whose keyword appears in the text.
///
/// Matching is a case-insensitive substring test in catalog order. A rule
/// with a `requires` phrase is skipped unless that phrase is present too.
pub fn detect_provider(text: &str, catalog: &ProviderCatalog) -> Option<DetectedProvider> {
    let normalized = text.to_uppercase();

    catalog
        .providers
        .iter()
        .filter(|rule| normalized.contains(&rule.keyword.to_uppercase()))
        .find(|rule| {
            rule.requires
                .as_ref()
                .is_none_or(|phrase| normalized.contains(&phrase.to_uppercase()))
        })
        .map(|rule| DetectedProvider {
            id: rule.provider_id.clone(),
            name: rule.provider_name.clone(),
        })
}

/// Billing category from the issuer; expensas markers always win.
pub fn detect_category(provider: Option<&ProviderId>, hoa_detected: bool) -> Category {
    if hoa_detected {
        return Category::Hoa;
    }
    provider.map_or(Category::Other, ProviderId::category)
}
