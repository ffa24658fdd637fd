//! CLI library components for the price portal.

pub mod config;
pub mod logging;
pub mod render;
pub mod shell;
pub mod store;
