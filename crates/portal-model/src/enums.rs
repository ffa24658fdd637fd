//! Type-safe enumerations for catalog and session state.
//!
//! Source sheets deliver these as free text; parsing happens once at the
//! ingestion boundary so the rest of the workspace only sees tagged values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Availability of a catalog item as published in the price sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    /// Available for sale (also the fallback for blank or unknown labels).
    #[default]
    #[serde(rename = "In Stock")]
    InStock,

    /// Available, but only a few units left.
    #[serde(rename = "Low Stock")]
    LowStock,

    /// Not currently available.
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    /// Returns the label as it appears in the price sheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    /// Parse a sheet label, falling back to [`StockStatus::InStock`] when the
    /// label is blank or not recognized.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = String;

    /// Parse a stock label (case-insensitive, `-`/`_` accepted as separators).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|ch| if ch == '-' || ch == '_' { ' ' } else { ch })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        match normalized.as_str() {
            "IN STOCK" => Ok(StockStatus::InStock),
            "LOW STOCK" => Ok(StockStatus::LowStock),
            "OUT OF STOCK" => Ok(StockStatus::OutOfStock),
            _ => Err(format!("Unknown stock status: {s}")),
        }
    }
}

/// Reachability of the remote collaborators, as last observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Last request succeeded.
    Online,
    /// A reload or login is in flight.
    Syncing,
    /// Last request failed.
    Error,
    /// Nothing has been attempted yet.
    #[default]
    Unknown,
}

impl ConnectionStatus {
    /// Short human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Online => "Connected",
            Self::Syncing => "Connecting...",
            Self::Error => "Server Error",
            Self::Unknown => "Unknown Status",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status_from_str() {
        assert_eq!(
            "In Stock".parse::<StockStatus>().unwrap(),
            StockStatus::InStock
        );
        assert_eq!(
            "LOW STOCK".parse::<StockStatus>().unwrap(),
            StockStatus::LowStock
        );
        assert_eq!(
            "  out-of-stock ".parse::<StockStatus>().unwrap(),
            StockStatus::OutOfStock
        );
        assert!("Backordered".parse::<StockStatus>().is_err());
    }

    #[test]
    fn test_stock_status_fallback() {
        assert_eq!(StockStatus::from_label(""), StockStatus::InStock);
        assert_eq!(StockStatus::from_label("??"), StockStatus::InStock);
        assert_eq!(StockStatus::from_label("Low Stock"), StockStatus::LowStock);
    }

    #[test]
    fn test_stock_status_serializes_as_label() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"Out of Stock\"");
    }

    #[test]
    fn test_connection_status_default() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Unknown);
        assert_eq!(ConnectionStatus::Error.to_string(), "Server Error");
    }
}
