//! Positional mapping from parsed rows to catalog entries.

use chrono::Local;

use portal_model::{CatalogEntry, DEFAULT_CATEGORY, StockStatus, UNKNOWN_LABEL};

use crate::delimited::Row;
use crate::numeric::coerce_amount;

/// Rows with fewer fields than this are treated as incomplete and dropped.
pub const MIN_FIELDS: usize = 10;

/// Source column positions in the published price sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub category: usize,
    pub brand: usize,
    pub model: usize,
    pub mrp: usize,
    pub stock_status: usize,
    pub last_updated: usize,
    pub cost_price: usize,
    pub selling_price: usize,
    pub margin: usize,
    pub margin_percentage: usize,
}

impl ColumnLayout {
    /// Layout of the price sheet as currently published.
    pub const PRICE_SHEET: ColumnLayout = ColumnLayout {
        category: 0,
        brand: 1,
        model: 2,
        mrp: 7,
        stock_status: 9,
        last_updated: 10,
        cost_price: 14,
        selling_price: 15,
        margin: 17,
        margin_percentage: 18,
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::PRICE_SHEET
    }
}

/// Options for one normalization pass.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub layout: ColumnLayout,
    /// Label used when a row has no last-updated value.
    pub fallback_date: String,
}

impl NormalizeOptions {
    /// Options with an explicit fallback date, for reproducible ingestion.
    pub fn with_fallback_date(fallback_date: impl Into<String>) -> Self {
        Self {
            layout: ColumnLayout::default(),
            fallback_date: fallback_date.into(),
        }
    }
}

impl Default for NormalizeOptions {
    /// Uses today's local date (`dd/mm/yyyy`) as the fallback.
    fn default() -> Self {
        Self::with_fallback_date(Local::now().format("%d/%m/%Y").to_string())
    }
}

/// Result of normalizing the data rows of one document.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRows {
    pub entries: Vec<CatalogEntry>,
    /// Data rows discarded for having fewer than [`MIN_FIELDS`] fields.
    pub dropped: usize,
}

/// Maps parsed rows to entries, discarding the header row and short rows.
///
/// Ids are assigned in order over the retained rows, starting at `item-0`.
pub fn normalize_rows(rows: &[Row], options: &NormalizeOptions) -> NormalizedRows {
    let data_rows = rows.get(1..).unwrap_or_default();
    let mut entries = Vec::with_capacity(data_rows.len());
    let mut dropped = 0usize;
    for row in data_rows {
        if row.len() < MIN_FIELDS {
            dropped += 1;
            continue;
        }
        entries.push(normalize_row(row, entries.len(), options));
    }
    NormalizedRows { entries, dropped }
}

/// Maps one complete row to an entry with the given per-cycle index.
pub fn normalize_row(row: &[String], index: usize, options: &NormalizeOptions) -> CatalogEntry {
    let layout = &options.layout;
    let text = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");
    let label = |idx: usize, fallback: &str| {
        let value = text(idx);
        if value.is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    };

    CatalogEntry {
        id: CatalogEntry::synthesize_id(index),
        category: label(layout.category, DEFAULT_CATEGORY),
        brand: label(layout.brand, UNKNOWN_LABEL),
        model: label(layout.model, UNKNOWN_LABEL),
        cost_price: coerce_amount(text(layout.cost_price)),
        selling_price: coerce_amount(text(layout.selling_price)),
        mrp: coerce_amount(text(layout.mrp)),
        margin: coerce_amount(text(layout.margin)),
        margin_percentage: coerce_amount(text(layout.margin_percentage)),
        stock_status: StockStatus::from_label(text(layout.stock_status)),
        last_updated: label(layout.last_updated, &options.fallback_date),
    }
}
