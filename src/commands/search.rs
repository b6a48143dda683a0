//! The bundled fetch + extract "get data" operation.

use crate::amazon::{AmazonClient, AmazonSearch, Parser, PriceBounds, Product, ScrapeError};
use crate::config::Config;
use anyhow::{Context, Result};
use tracing::info;

/// Executes one product search: INR bounds in, extracted records out.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns the extracted products.
    pub async fn execute(
        &self,
        query: &str,
        price_from_inr: f64,
        price_to_inr: f64,
    ) -> Result<Vec<Product>> {
        let client =
            AmazonClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, query, price_from_inr, price_to_inr).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl AmazonSearch,
        query: &str,
        price_from_inr: f64,
        price_to_inr: f64,
    ) -> Result<Vec<Product>> {
        info!("Searching for: {} ({}-{} INR)", query, price_from_inr, price_to_inr);

        let bounds = PriceBounds::from_inr(price_from_inr, price_to_inr, self.config.usd_to_inr);

        let html = client.search(query, bounds).await?;

        let parser = Parser::new(self.config.usd_to_inr);
        let results = parser.parse_search(&html, query)?;

        if results.is_empty() {
            return Err(ScrapeError::NoResults.into());
        }

        info!("Found {} products ({} containers skipped)", results.count(), results.skipped.total());

        Ok(results.products)
    }
}
