//! HTTP client for Amazon requests using wreq for TLS fingerprint emulation.

use crate::amazon::models::PriceBounds;
use crate::amazon::ScrapeError;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for Amazon search fetching - enables mocking for tests.
#[async_trait]
pub trait AmazonSearch: Send + Sync {
    /// Performs a price-bounded search and returns the HTML response body.
    async fn search(&self, query: &str, bounds: PriceBounds) -> Result<String>;
}

/// Amazon HTTP client with browser impersonation.
pub struct AmazonClient {
    client: Client,
    base_url: Option<String>,
}

impl AmazonClient {
    /// Creates a new Amazon client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new Amazon client with an optional custom base URL (for testing).
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    /// Returns the base URL (custom for testing, or amazon.com for production).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| crate::amazon::parser::BASE_URL.to_string())
    }

    /// Performs one GET with a fixed set of browser-mimicking headers.
    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header(
                "User-Agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Connection", "keep-alive")
            .header("Upgrade-Insecure-Requests", "1")
            .header("TE", "Trailers")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            // Keep the body for diagnostics; the error carries the status.
            let body = response.text().await.unwrap_or_default();
            warn!("Request failed with status {}: {}", status, snippet(&body));
            return Err(ScrapeError::Http { status: status.as_u16() }.into());
        }

        response.text().await.context("Failed to read response body")
    }
}

/// Truncates a response body for log output.
fn snippet(body: &str) -> String {
    const MAX: usize = 500;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX).collect();
        format!("{}…", cut)
    }
}

#[async_trait]
impl AmazonSearch for AmazonClient {
    async fn search(&self, query: &str, bounds: PriceBounds) -> Result<String> {
        let url = format!(
            "{}/s?k={}&low-price={:.2}&high-price={:.2}",
            self.base_url(),
            urlencoding::encode(query),
            bounds.low,
            bounds.high
        );

        info!("Searching: {} ({:.2}-{:.2} USD)", query, bounds.low, bounds.high);
        self.get(&url).await
    }
}
