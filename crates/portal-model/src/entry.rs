use serde::{Deserialize, Serialize};

use crate::enums::StockStatus;

/// Category used when the source column is blank.
pub const DEFAULT_CATEGORY: &str = "General";

/// Brand and model used when the source column is blank.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One normalized pricing record for a sellable item.
///
/// `id` is synthesized per ingestion cycle (`item-0`, `item-1`, ...) and is
/// only stable until the next reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub category: String,
    pub brand: String,
    pub model: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub mrp: f64,
    pub margin: f64,
    /// Stored as delivered; see [`crate::display_margin_percentage`].
    pub margin_percentage: f64,
    pub stock_status: StockStatus,
    pub last_updated: String,
}

impl CatalogEntry {
    /// Builds the per-cycle identifier for the entry at `index`.
    pub fn synthesize_id(index: usize) -> String {
        format!("item-{index}")
    }

    /// Case-insensitive substring match against model or brand.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.model.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(brand: &str, model: &str) -> CatalogEntry {
        CatalogEntry {
            id: CatalogEntry::synthesize_id(0),
            category: DEFAULT_CATEGORY.to_string(),
            brand: brand.to_string(),
            model: model.to_string(),
            cost_price: 0.0,
            selling_price: 0.0,
            mrp: 0.0,
            margin: 0.0,
            margin_percentage: 0.0,
            stock_status: StockStatus::InStock,
            last_updated: "01/01/2024".to_string(),
        }
    }

    #[test]
    fn synthesized_ids_follow_row_order() {
        assert_eq!(CatalogEntry::synthesize_id(0), "item-0");
        assert_eq!(CatalogEntry::synthesize_id(12), "item-12");
    }

    #[test]
    fn text_match_checks_model_and_brand() {
        let item = entry("Samsung", "Galaxy S24");
        assert!(item.matches_text("galaxy"));
        assert!(item.matches_text("sung"));
        assert!(item.matches_text(""));
        assert!(!item.matches_text("pixel"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let item = entry("Acme", "One");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["sellingPrice"], 0.0);
        assert_eq!(json["stockStatus"], "In Stock");
        assert_eq!(json["lastUpdated"], "01/01/2024");
    }
}
