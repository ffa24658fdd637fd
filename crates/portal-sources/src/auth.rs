//! Credential check against the script endpoint.
//!
//! Protocol: `GET <auth_url>?type=checkLogin&email=<email>&password=<password>`
//! answered by a JSON body `{"success": bool, "message": string?}`.

use reqwest::Url;
use tracing::debug;

use portal_catalog::{AuthResponse, Authenticator, Credentials, TransportError};

use crate::client::{
    HttpOptions, append_cache_buster, build_client, ensure_success, network_error,
};

/// Request type understood by the script endpoint.
const CHECK_LOGIN: &str = "checkLogin";

/// Authenticates against the remote script endpoint.
#[derive(Debug, Clone)]
pub struct ScriptAuthenticator {
    client: reqwest::Client,
    url: Url,
    cache_bust: bool,
}

impl ScriptAuthenticator {
    pub fn new(url: Url, options: &HttpOptions) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(options)?,
            url,
            cache_bust: options.cache_bust,
        })
    }

    /// The URL for checking `credentials`. Contains the password; never log it.
    pub fn request_url(&self, credentials: &Credentials) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("type", CHECK_LOGIN)
            .append_pair("email", credentials.email())
            .append_pair("password", credentials.password());
        if self.cache_bust {
            append_cache_buster(&mut url);
        }
        url
    }
}

/// Decodes a credential-check body.
pub fn decode_auth_response(body: &str) -> Result<AuthResponse, TransportError> {
    serde_json::from_str(body)
        .map_err(|e| TransportError::Decode(format!("unexpected credential check response: {e}")))
}

impl Authenticator for ScriptAuthenticator {
    async fn check(&self, credentials: &Credentials) -> Result<AuthResponse, TransportError> {
        debug!(
            host = self.url.host_str().unwrap_or_default(),
            "checking credentials"
        );

        let response = self
            .client
            .get(self.request_url(credentials))
            .send()
            .await
            .map_err(network_error)?;
        let response = ensure_success(response, "credential check")?;
        let body = response.text().await.map_err(network_error)?;

        decode_auth_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::parse_endpoint;

    fn authenticator(cache_bust: bool) -> ScriptAuthenticator {
        let options = HttpOptions {
            cache_bust,
            ..HttpOptions::default()
        };
        let url = parse_endpoint("https://script.example.com/macros/s/xyz/exec").unwrap();
        ScriptAuthenticator::new(url, &options).unwrap()
    }

    #[test]
    fn test_request_url_encodes_credentials() {
        let credentials = Credentials::new("Asha+Rao@Example.in", "p&ss word");
        let url = authenticator(false).request_url(&credentials);
        assert_eq!(
            url.as_str(),
            "https://script.example.com/macros/s/xyz/exec?type=checkLogin&email=asha%2Brao%40example.in&password=p%26ss+word"
        );
    }

    #[test]
    fn test_request_url_appends_timestamp_last() {
        let credentials = Credentials::new("a@b.in", "pw");
        let url = authenticator(true).request_url(&credentials);
        let keys: Vec<String> = url.query_pairs().map(|(key, _)| key.into_owned()).collect();
        assert_eq!(keys, vec!["type", "email", "password", "t"]);
    }

    #[test]
    fn test_decode_granted_and_denied() {
        assert_eq!(
            decode_auth_response(r#"{"success":true}"#).unwrap(),
            AuthResponse::granted()
        );
        assert_eq!(
            decode_auth_response(r#"{"success":false,"message":"Account disabled"}"#).unwrap(),
            AuthResponse::denied(Some("Account disabled"))
        );
        // Missing flag means no access.
        assert_eq!(
            decode_auth_response(r#"{"message":null}"#).unwrap(),
            AuthResponse::denied(None)
        );
    }

    #[test]
    fn test_decode_rejects_html() {
        let err = decode_auth_response("<html>Moved</html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
