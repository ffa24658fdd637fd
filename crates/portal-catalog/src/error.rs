//! Error types for catalog and session operations.

use thiserror::Error;

/// Message shown when the credential check rejects a login without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Access Denied: Invalid Credentials";

/// A failed call to a remote collaborator.
///
/// Callers treat every variant as one opaque failure state; the variants
/// only exist for logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection, timeout, or request construction failed.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator answered with a non-success HTTP status.
    #[error("{context} returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// What was being fetched.
        context: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Reading a local source failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl TransportError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the server. Please check your connection.",
            Self::Status { .. } | Self::Decode(_) => "The server returned an unexpected response.",
            Self::Io(_) => "Could not read the price list.",
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Errors that end a login attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoginError {
    /// Email or password was blank after trimming.
    #[error("email and password are required")]
    MissingCredentials,

    /// The credential check answered, but said no.
    #[error("{0}")]
    Rejected(String),

    /// The credential check could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure of the session storage collaborator.
#[derive(Debug, Error)]
#[error("session store error: {0}")]
pub struct StoreError(pub String);

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self(err.to_string())
    }
}
