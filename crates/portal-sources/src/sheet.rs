//! The published price sheet.

use reqwest::Url;
use tracing::debug;

use portal_catalog::{CatalogSource, TransportError};

use crate::client::{
    HttpOptions, append_cache_buster, build_client, ensure_success, network_error,
};

/// Fetches the delimited export of the published price sheet.
#[derive(Debug, Clone)]
pub struct PublishedSheetSource {
    client: reqwest::Client,
    url: Url,
    cache_bust: bool,
}

impl PublishedSheetSource {
    pub fn new(url: Url, options: &HttpOptions) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(options)?,
            url,
            cache_bust: options.cache_bust,
        })
    }

    /// The URL one fetch will hit.
    pub fn request_url(&self) -> Url {
        let mut url = self.url.clone();
        if self.cache_bust {
            append_cache_buster(&mut url);
        }
        url
    }
}

impl CatalogSource for PublishedSheetSource {
    async fn fetch_catalog(&self) -> Result<String, TransportError> {
        let url = self.request_url();
        debug!(url = %url, "requesting price sheet");

        let response = self.client.get(url).send().await.map_err(network_error)?;
        let response = ensure_success(response, "price sheet")?;
        let text = response.text().await.map_err(network_error)?;

        debug!(bytes = text.len(), "price sheet received");
        Ok(text)
    }

    fn describe(&self) -> String {
        let host = self.url.host_str().unwrap_or("unknown host");
        format!("published sheet at {host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::parse_endpoint;

    const SHEET: &str = "https://docs.example.com/spreadsheets/d/e/abc/pub?gid=0&single=true&output=csv";

    #[test]
    fn test_request_url_without_cache_bust() {
        let options = HttpOptions {
            cache_bust: false,
            ..HttpOptions::default()
        };
        let url = parse_endpoint(SHEET).unwrap();
        let source = PublishedSheetSource::new(url, &options).unwrap();
        assert_eq!(source.request_url().as_str(), SHEET);
    }

    #[test]
    fn test_request_url_with_cache_bust() {
        let url = parse_endpoint(SHEET).unwrap();
        let source = PublishedSheetSource::new(url, &HttpOptions::default()).unwrap();
        let requested = source.request_url();
        assert!(requested.as_str().starts_with(SHEET));
        assert!(requested.query_pairs().any(|(key, _)| key == "t"));
    }

    #[test]
    fn test_describe_names_host() {
        let url = parse_endpoint(SHEET).unwrap();
        let source = PublishedSheetSource::new(url, &HttpOptions::default()).unwrap();
        assert_eq!(source.describe(), "published sheet at docs.example.com");
    }
}
