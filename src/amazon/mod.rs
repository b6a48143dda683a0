//! Amazon-specific modules for HTTP client, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{AmazonClient, AmazonSearch};
pub use models::{PriceBounds, Product, SearchResults, SkipStats};
pub use parser::Parser;

use thiserror::Error;

/// Typed failures of the search pipeline.
///
/// Everything else travels as `anyhow` context; these are the kinds the GUI
/// distinguishes when picking a status message.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("search request failed with HTTP {status}")]
    Http { status: u16 },

    #[error("CAPTCHA page detected; Amazon is blocking requests")]
    Captcha,

    #[error("no products found for this search")]
    NoResults,
}
