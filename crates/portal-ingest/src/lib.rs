//! Catalog ingestion utilities.
//!
//! This crate turns the raw text of a published price sheet into normalized
//! [`CatalogEntry`] values.
//!
//! # Features
//!
//! - **Delimited parsing**: quoted fields, embedded commas and line breaks, `""` escapes
//! - **Numeric coercion**: currency symbols and digit grouping stripped, `0` on failure
//! - **Normalization**: positional columns mapped to typed entries with defaults
//!
//! None of these steps fail: malformed rows are dropped and unparsable
//! amounts become zero.
//!
//! # Example
//!
//! ```ignore
//! use portal_ingest::{NormalizeOptions, ingest_catalog};
//!
//! let output = ingest_catalog(&csv_text, &NormalizeOptions::default());
//! println!("{} entries", output.entries.len());
//! ```

mod delimited;
mod normalize;
mod numeric;

use tracing::debug;

use portal_model::CatalogEntry;

// === Parsing ===
pub use delimited::{Row, format_row, normalize_field, parse_delimited, quote_field};

// === Coercion ===
pub use numeric::coerce_amount;

// === Normalization ===
pub use normalize::{
    ColumnLayout, MIN_FIELDS, NormalizeOptions, NormalizedRows, normalize_row, normalize_rows,
};

/// Outcome of one ingestion cycle.
#[derive(Debug, Clone, Default)]
pub struct IngestOutput {
    /// Normalized entries in source order.
    pub entries: Vec<CatalogEntry>,
    /// Header row as parsed, if the document had any rows.
    pub header: Option<Row>,
    /// Number of rows produced by the parser, header included.
    pub rows_parsed: usize,
    /// Data rows discarded as incomplete.
    pub rows_dropped: usize,
}

/// Runs one full ingestion cycle: parse, drop the header, normalize.
pub fn ingest_catalog(text: &str, options: &NormalizeOptions) -> IngestOutput {
    let rows = parse_delimited(text);
    let NormalizedRows { entries, dropped } = normalize_rows(&rows, options);
    debug!(
        rows = rows.len(),
        entries = entries.len(),
        dropped,
        "catalog text ingested"
    );
    IngestOutput {
        rows_parsed: rows.len(),
        header: rows.into_iter().next(),
        rows_dropped: dropped,
        entries,
    }
}
