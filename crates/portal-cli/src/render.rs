use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use portal_ingest::format_row;
use portal_model::{CatalogEntry, StockStatus, display_margin_percentage, format_inr};

/// Column order of the delimited export.
const EXPORT_HEADER: [&str; 11] = [
    "id",
    "category",
    "brand",
    "model",
    "costPrice",
    "sellingPrice",
    "mrp",
    "margin",
    "marginPercentage",
    "stockStatus",
    "lastUpdated",
];

/// Builds the price table shown by `browse` and the shell.
pub fn price_table(entries: &[&CatalogEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Brand"),
        header_cell("Model"),
        header_cell("Category"),
        header_cell("Selling"),
        header_cell("MRP"),
        header_cell("Cost"),
        header_cell("Margin"),
        header_cell("Margin %"),
        header_cell("Stock"),
        header_cell("Updated"),
    ]);
    apply_table_style(&mut table);
    for index in 3..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.brand).add_attribute(Attribute::Bold),
            Cell::new(&entry.model),
            dim_cell(&entry.category),
            Cell::new(format_inr(entry.selling_price)).fg(Color::Green),
            Cell::new(format_inr(entry.mrp)),
            Cell::new(format_inr(entry.cost_price)),
            Cell::new(format_inr(entry.margin)),
            Cell::new(display_margin_percentage(entry.margin_percentage)),
            stock_cell(entry.stock_status),
            dim_cell(&entry.last_updated),
        ]);
    }
    table
}

/// Writes entries as delimited text with a header row.
pub fn results_csv(entries: &[&CatalogEntry]) -> String {
    let mut out = format_row(&EXPORT_HEADER);
    out.push('\n');
    for entry in entries {
        let fields = [
            entry.id.clone(),
            entry.category.clone(),
            entry.brand.clone(),
            entry.model.clone(),
            entry.cost_price.to_string(),
            entry.selling_price.to_string(),
            entry.mrp.to_string(),
            entry.margin.to_string(),
            entry.margin_percentage.to_string(),
            entry.stock_status.to_string(),
            entry.last_updated.clone(),
        ];
        out.push_str(&format_row(&fields));
        out.push('\n');
    }
    out
}

/// Writes entries as a pretty JSON array.
pub fn results_json(entries: &[&CatalogEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// One line per facet value, the active one marked.
pub fn facet_lines(title: &str, values: &[String], active: &str) -> String {
    let mut out = format!("{title}:\n");
    for value in values {
        let marker = if value == active { '*' } else { ' ' };
        out.push_str(&format!("  {marker} {value}\n"));
    }
    out
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn stock_cell(status: StockStatus) -> Cell {
    let color = match status {
        StockStatus::InStock => Color::Green,
        StockStatus::LowStock => Color::Yellow,
        StockStatus::OutOfStock => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
