//! Data model for the price portal catalog.

pub mod display;
pub mod entry;
pub mod enums;

pub use display::{display_margin_percentage, format_inr, margin_percentage_value};
pub use entry::{CatalogEntry, DEFAULT_CATEGORY, UNKNOWN_LABEL};
pub use enums::{ConnectionStatus, StockStatus};
