//! Client for the external product search service.
//!
//! # API
//!
//! ```text
//! POST {SEARCH_API_URL}/products/search?q=<percent-encoded query>
//! Content-Type: application/json
//!
//! {"gender": "Women", "styles": ["Casual", "Vintage"]}
//! ```
//!
//! The body carries only the filters that are set (`{}` when none are). The
//! response is a JSON array of products, returned as-is: no validation,
//! retry or timeout is applied here.

use std::sync::Arc;

use async_trait::async_trait;
use fashion_assistant_core::{Product, SearchRequest};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Errors that can occur when calling the search service.
#[derive(Debug, Error)]
pub enum SearchApiError {
    /// The request could not be sent or the response not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("search service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a JSON array of products.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Something that can answer product searches.
///
/// Implemented by [`SearchApiClient`] for the real service; tests supply
/// their own implementations.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    /// Search for `query`, narrowed by `filters`.
    async fn search_products(
        &self,
        query: &str,
        filters: &SearchRequest,
    ) -> Result<Vec<Product>, SearchApiError>;
}

/// HTTP client for the product search service.
#[derive(Clone)]
pub struct SearchApiClient {
    inner: Arc<SearchApiClientInner>,
}

struct SearchApiClientInner {
    client: reqwest::Client,
    endpoint: String,
}

impl SearchApiClient {
    /// Create a client for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let endpoint = format!(
            "{}/products/search",
            base_url.as_str().trim_end_matches('/')
        );

        Self {
            inner: Arc::new(SearchApiClientInner {
                client: reqwest::Client::new(),
                endpoint,
            }),
        }
    }

    /// The search endpoint, without the query string.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Full request URL for `query`.
    fn url_for(&self, query: &str) -> String {
        format!("{}?q={}", self.inner.endpoint, urlencoding::encode(query))
    }
}

#[async_trait]
impl ProductSearch for SearchApiClient {
    #[instrument(skip(self, filters), fields(personalized = !filters.is_empty()))]
    async fn search_products(
        &self,
        query: &str,
        filters: &SearchRequest,
    ) -> Result<Vec<Product>, SearchApiError> {
        let response = self
            .inner
            .client
            .post(self.url_for(query))
            .json(filters)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let products: Vec<Product> = serde_json::from_slice(&bytes)?;
        debug!(count = products.len(), "Search service returned products");

        Ok(products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> SearchApiClient {
        SearchApiClient::new(&Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_from_base_url() {
        assert_eq!(
            client("http://localhost:8000").endpoint(),
            "http://localhost:8000/products/search"
        );
        assert_eq!(
            client("http://search.internal/api/").endpoint(),
            "http://search.internal/api/products/search"
        );
    }

    #[test]
    fn test_query_is_percent_encoded() {
        let client = client("http://localhost:8000");
        assert_eq!(
            client.url_for("red dress & shoes"),
            "http://localhost:8000/products/search?q=red%20dress%20%26%20shoes"
        );
    }

    #[test]
    fn test_status_error_display() {
        let err = SearchApiError::Status {
            status: 422,
            body: "q too short".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "search service returned status 422: q too short"
        );
    }
}
