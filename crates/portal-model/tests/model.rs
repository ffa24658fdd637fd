//! Tests for portal-model types.

use portal_model::{CatalogEntry, StockStatus, display_margin_percentage, format_inr};

fn sample() -> CatalogEntry {
    CatalogEntry {
        id: "item-0".to_string(),
        category: "Mobile".to_string(),
        brand: "Acme".to_string(),
        model: "Rocket 5G".to_string(),
        cost_price: 20000.0,
        selling_price: 22500.0,
        mrp: 24999.0,
        margin: 2500.0,
        margin_percentage: 0.111,
        stock_status: StockStatus::LowStock,
        last_updated: "01/10/2026".to_string(),
    }
}

#[test]
fn entry_round_trips_through_json() {
    let entry = sample();
    let json = serde_json::to_string(&entry).expect("serialize entry");
    let round: CatalogEntry = serde_json::from_str(&json).expect("deserialize entry");
    assert_eq!(round, entry);
}

#[test]
fn price_card_labels() {
    let entry = sample();
    assert_eq!(format_inr(entry.selling_price), "₹22,500");
    assert_eq!(format_inr(entry.cost_price), "₹20,000");
    assert_eq!(display_margin_percentage(entry.margin_percentage), "11.1");
}
