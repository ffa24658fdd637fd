//! Shared HTTP client construction and URL helpers.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use portal_catalog::TransportError;

/// User agent string for every request.
const USER_AGENT_VALUE: &str = concat!("price-portal/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Settings shared by the HTTP collaborators.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    /// Append `t=<unix millis>` so caches never answer with a stale body.
    pub cache_bust: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            cache_bust: true,
        }
    }
}

/// Builds the reqwest client used by the HTTP collaborators.
pub fn build_client(options: &HttpOptions) -> Result<reqwest::Client, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(options.timeout)
        .build()
        .map_err(|e| TransportError::Network(format!("failed to create HTTP client: {e}")))
}

/// Parses an endpoint URL from configuration.
pub fn parse_endpoint(raw: &str) -> Result<Url, TransportError> {
    Url::parse(raw.trim()).map_err(|e| TransportError::Network(format!("invalid URL {raw}: {e}")))
}

/// Appends the cache-busting timestamp parameter.
pub fn append_cache_buster(url: &mut Url) {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    url.query_pairs_mut().append_pair("t", &millis.to_string());
}

/// Maps a reqwest failure onto the opaque transport error.
///
/// The request URL is dropped: credential checks carry the password in it.
pub(crate) fn network_error(err: reqwest::Error) -> TransportError {
    let err = err.without_url();
    if err.is_decode() {
        TransportError::Decode(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Rejects non-success responses.
pub(crate) fn ensure_success(
    response: reqwest::Response,
    context: &str,
) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Status {
            status: status.as_u16(),
            context: context.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(build_client(&HttpOptions::default()).is_ok());
    }

    #[test]
    fn test_cache_buster_keeps_existing_query() {
        let mut url = parse_endpoint("https://example.com/pub?gid=7&output=csv").unwrap();
        append_cache_buster(&mut url);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("gid".to_string(), "7".to_string()));
        assert_eq!(pairs[1], ("output".to_string(), "csv".to_string()));
        assert_eq!(pairs[2].0, "t");
        assert!(pairs[2].1.parse::<u128>().is_ok());
    }

    #[tokio::test]
    async fn test_network_error_omits_request_url() {
        let client = build_client(&HttpOptions::default()).unwrap();
        let err = client
            .get("http://127.0.0.1:1/exec?password=hunter2")
            .send()
            .await
            .unwrap_err();

        let mapped = network_error(err);
        assert!(matches!(mapped, TransportError::Network(_)));
        assert!(!mapped.to_string().contains("hunter2"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = parse_endpoint("not a url").unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
