//! Async HTTP client wrapping reqwest.
//!
//! Single-attempt requests only: one GET for the page, HEAD for reachability
//! checks, and GET for font bodies. Redirects follow reqwest's default policy.

use std::time::Duration;

use crate::types::{FontgrabError, FontgrabResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// A fetched HTML page.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Response to a binary GET. The body is only read on success.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl BinaryResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client shared by every pipeline stage.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with the given per-request timeout.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// GET an HTML page. Any non-success status is an error.
    pub async fn get_page(&self, url: &str) -> FontgrabResult<PageResponse> {
        let r = self.client.get(url).send().await?;
        let status = r.status();
        let final_url = r.url().to_string();

        if !status.is_success() {
            return Err(FontgrabError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = r.text().await?;

        Ok(PageResponse {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            body,
        })
    }

    /// HEAD `url`; true only for a success status. Never fails.
    pub async fn head_ok(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) => {
                let ok = resp.status().is_success();
                tracing::debug!(url, status = resp.status().as_u16(), "head check");
                ok
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "head check failed");
                false
            }
        }
    }

    /// GET `url` as bytes. Transport errors surface as `Err`; a non-success
    /// status comes back as a response with an empty body.
    pub async fn get_bytes(&self, url: &str) -> FontgrabResult<BinaryResponse> {
        let r = self.client.get(url).send().await?;
        let status = r.status().as_u16();

        if !r.status().is_success() {
            return Ok(BinaryResponse {
                status,
                body: Vec::new(),
            });
        }

        let body = r.bytes().await?.to_vec();
        Ok(BinaryResponse { status, body })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS)
    }
}
