//! Query parameters for the catalog views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel facet label that selects every value.
pub const ALL_FACET: &str = "All";

/// Selected value of one facet dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FacetValue {
    /// No constraint.
    #[default]
    All,
    /// Exactly this category or brand.
    Named(String),
}

impl FacetValue {
    /// Builds a selection from a facet label; `"All"` maps to [`FacetValue::All`].
    pub fn from_label(label: &str) -> Self {
        if label == ALL_FACET {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    /// Returns the facet label.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_FACET,
            Self::Named(name) => name,
        }
    }

    /// Returns true when `value` satisfies this selection.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for FacetValue {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<String> for FacetValue {
    fn from(label: String) -> Self {
        if label == ALL_FACET {
            Self::All
        } else {
            Self::Named(label)
        }
    }
}

/// How the text query combines with the facet selections.
///
/// Two incompatible behaviors have shipped over time; both are kept and the
/// active one is chosen by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPolicy {
    /// Text AND category AND brand. When that yields nothing but the text
    /// alone would match something, the text-only matches are returned.
    #[default]
    Fallback,
    /// A non-empty text query ignores both facets until it is cleared.
    Override,
}

impl FilterPolicy {
    /// Returns the configuration name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fallback => "fallback",
            Self::Override => "override",
        }
    }
}

impl fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fallback" | "and" => Ok(Self::Fallback),
            "override" => Ok(Self::Override),
            _ => Err(format!("Unknown filter policy: {s}")),
        }
    }
}

/// The three independent query parameters of a browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    text: String,
    category: FacetValue,
    brand: FacetValue,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style text query.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder-style category selection (resets the brand).
    #[must_use]
    pub fn with_category(mut self, category: impl Into<FacetValue>) -> Self {
        self.set_category(category);
        self
    }

    /// Builder-style brand selection.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<FacetValue>) -> Self {
        self.set_brand(brand);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text query lowercased and trimmed, as used for matching.
    pub fn needle(&self) -> String {
        self.text.trim().to_lowercase()
    }

    pub fn category(&self) -> &FacetValue {
        &self.category
    }

    pub fn brand(&self) -> &FacetValue {
        &self.brand
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Selects a category. The brand always returns to `All`, so a brand is
    /// never left selected against a category it does not belong to.
    pub fn set_category(&mut self, category: impl Into<FacetValue>) {
        self.category = category.into();
        self.brand = FacetValue::All;
    }

    pub fn set_brand(&mut self, brand: impl Into<FacetValue>) {
        self.brand = brand.into();
    }

    /// Clears the text query and both facets.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_value_from_label() {
        assert_eq!(FacetValue::from_label("All"), FacetValue::All);
        assert_eq!(
            FacetValue::from_label("Watch"),
            FacetValue::Named("Watch".to_string())
        );
        assert!(FacetValue::All.matches("anything"));
        assert!(!FacetValue::from("Phone").matches("Watch"));
    }

    #[test]
    fn category_change_resets_brand() {
        let mut query = CatalogQuery::new()
            .with_category("Phone")
            .with_brand("Acme");
        assert_eq!(query.brand().as_str(), "Acme");

        query.set_category("Watch");
        assert_eq!(query.category().as_str(), "Watch");
        assert!(query.brand().is_all());
    }

    #[test]
    fn needle_is_trimmed_and_lowercased() {
        let query = CatalogQuery::new().with_text("  GaLaXy ");
        assert_eq!(query.needle(), "galaxy");
        assert_eq!(query.text(), "  GaLaXy ");
    }

    #[test]
    fn filter_policy_from_str() {
        assert_eq!(
            "fallback".parse::<FilterPolicy>(),
            Ok(FilterPolicy::Fallback)
        );
        assert_eq!(
            "OVERRIDE".parse::<FilterPolicy>(),
            Ok(FilterPolicy::Override)
        );
        assert!("strict".parse::<FilterPolicy>().is_err());
        assert_eq!(FilterPolicy::default(), FilterPolicy::Fallback);
    }
}
