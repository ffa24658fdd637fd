//! Concrete collaborators for the catalog engine.
//!
//! - [`PublishedSheetSource`] fetches the published price sheet over HTTP.
//! - [`ScriptAuthenticator`] runs the remote credential check.
//! - [`LocalFileSource`] reads a saved export from disk.

mod auth;
mod client;
mod file;
mod sheet;

pub use auth::{ScriptAuthenticator, decode_auth_response};
pub use client::{DEFAULT_TIMEOUT, HttpOptions, append_cache_buster, build_client, parse_endpoint};
pub use file::LocalFileSource;
pub use sheet::PublishedSheetSource;
