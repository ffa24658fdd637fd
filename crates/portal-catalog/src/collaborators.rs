//! Seams to the remote collaborators.
//!
//! Both calls are suspendable: the engine awaits them without blocking and
//! resumes on completion or failure. Concrete HTTP and file implementations
//! live in `portal-sources`.

use std::future::Future;

use serde::Deserialize;

use crate::error::TransportError;

/// Supplies the raw delimited text of the price sheet.
pub trait CatalogSource {
    fn fetch_catalog(&self) -> impl Future<Output = Result<String, TransportError>>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Runs the remote credential check.
pub trait Authenticator {
    fn check(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthResponse, TransportError>>;
}

/// Login credentials, normalized for submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Lowercases and trims the email and trims the password.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: password.trim().to_string(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// True when either value is blank after normalization.
    pub fn is_incomplete(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of a credential-check response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    /// Only an explicit `true` grants access.
    #[serde(default)]
    pub success: bool,
    /// Optional human-readable reason.
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn granted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn denied(message: Option<&str>) -> Self {
        Self {
            success: false,
            message: message.map(str::to_string),
        }
    }
}
