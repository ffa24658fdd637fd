//! Output rendering for browse results.

use portal_cli::render::{facet_lines, price_table, results_csv, results_json};
use portal_model::{CatalogEntry, StockStatus};

fn entry(id: &str, brand: &str, model: &str, stock_status: StockStatus) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        category: "Mobile".to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        cost_price: 20000.0,
        selling_price: 22500.0,
        mrp: 24999.0,
        margin: 2500.0,
        margin_percentage: 0.111,
        stock_status,
        last_updated: "01/10/2026".to_string(),
    }
}

#[test]
fn csv_export_quotes_awkward_fields() {
    let entries = [
        entry("item-0", "Acme", "Rocket, 5G", StockStatus::LowStock),
        entry("item-1", "Zen", "Say \"Hi\"", StockStatus::InStock),
    ];
    let refs: Vec<&CatalogEntry> = entries.iter().collect();
    let csv = results_csv(&refs);
    insta::assert_snapshot!(csv.trim_end(), @r#"
    id,category,brand,model,costPrice,sellingPrice,mrp,margin,marginPercentage,stockStatus,lastUpdated
    item-0,Mobile,Acme,"Rocket, 5G",20000,22500,24999,2500,0.111,Low Stock,01/10/2026
    item-1,Mobile,Zen,"Say ""Hi""",20000,22500,24999,2500,0.111,In Stock,01/10/2026
    "#);
}

#[test]
fn csv_export_reparses_to_same_model_names() {
    let entries = [entry("item-0", "Acme", "Rocket, 5G", StockStatus::OutOfStock)];
    let refs: Vec<&CatalogEntry> = entries.iter().collect();
    let rows = portal_ingest::parse_delimited(&results_csv(&refs));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][3], "Rocket, 5G");
    assert_eq!(rows[1][9], "Out of Stock");
}

#[test]
fn json_export_uses_camel_case() {
    let entries = [entry("item-0", "Acme", "Rocket", StockStatus::InStock)];
    let refs: Vec<&CatalogEntry> = entries.iter().collect();
    let json = results_json(&refs).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["sellingPrice"], 22500.0);
    assert_eq!(value[0]["stockStatus"], "In Stock");
}

#[test]
fn table_shows_rupee_amounts() {
    let entries = [entry("item-0", "Acme", "Rocket", StockStatus::InStock)];
    let refs: Vec<&CatalogEntry> = entries.iter().collect();
    let rendered = price_table(&refs).to_string();
    assert!(rendered.contains("₹22,500"));
    assert!(rendered.contains("₹24,999"));
    assert!(rendered.contains("11.1"));
}

#[test]
fn facet_lines_mark_active_value() {
    let values = vec!["All".to_string(), "Mobile".to_string()];
    assert_eq!(
        facet_lines("Categories", &values, "Mobile"),
        "Categories:\n    All\n  * Mobile\n"
    );
}
