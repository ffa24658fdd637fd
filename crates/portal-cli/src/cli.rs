//! CLI argument definitions for the price portal.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use portal_catalog::FilterPolicy;

#[derive(Parser)]
#[command(
    name = "price-portal",
    version,
    about = "Browse the mobile price catalog from the terminal",
    long_about = "Browse the published mobile price catalog.\n\n\
                  Sign in once, then search by model or brand and narrow by\n\
                  category and brand. Prices are shown in rupees."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow emails to appear in log output.
    #[arg(long = "log-sensitive", global = true)]
    pub log_sensitive: bool,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the price sheet URL.
    #[arg(long = "catalog-url", env = "PORTAL_CATALOG_URL", global = true)]
    pub catalog_url: Option<String>,

    /// Override the credential check URL.
    #[arg(long = "auth-url", env = "PORTAL_AUTH_URL", global = true)]
    pub auth_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login(LoginArgs),

    /// Forget the stored session.
    Logout,

    /// Show the session and configured endpoints.
    Status,

    /// Load the price list and print the matching items.
    Browse(BrowseArgs),

    /// List categories and the brands of one category.
    Facets(FacetsArgs),

    /// Interactive search over the loaded price list.
    Shell(ShellArgs),

    /// Print the effective settings, optionally saving them.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long = "email")]
    pub email: String,

    /// Account password.
    #[arg(long = "password", env = "PORTAL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Parser)]
pub struct SourceArgs {
    /// Read the price list from a saved export instead of the network.
    #[arg(long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// How the search combines with the category and brand filters.
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,
}

#[derive(Parser)]
pub struct BrowseArgs {
    /// Match against model and brand (case-insensitive).
    #[arg(long = "search", short = 's', default_value = "")]
    pub search: String,

    /// Category filter.
    #[arg(long = "category", default_value = "All")]
    pub category: String,

    /// Brand filter.
    #[arg(long = "brand", default_value = "All")]
    pub brand: String,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser)]
pub struct FacetsArgs {
    /// Category whose brands are listed.
    #[arg(long = "category", default_value = "All")]
    pub category: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser)]
pub struct ShellArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Write the effective settings to the settings file.
    #[arg(long = "write")]
    pub write: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
    Csv,
}

/// CLI filter policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Filters AND search; broaden to search-only when nothing matches.
    Fallback,
    /// A non-empty search ignores the filters.
    Override,
}

impl From<PolicyArg> for FilterPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Fallback => FilterPolicy::Fallback,
            PolicyArg::Override => FilterPolicy::Override,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
