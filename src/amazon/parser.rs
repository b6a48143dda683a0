//! HTML extractor for Amazon search result pages.

use crate::amazon::models::{Product, SearchResults};
use crate::amazon::selectors::{errors, search, PRICE_VALUE};
use crate::amazon::ScrapeError;
use crate::currency;
use anyhow::Result;
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Base origin for resolving relative product links.
pub const BASE_URL: &str = "https://www.amazon.com";

/// Why a result container was dropped.
///
/// "No numeric substring" and "substring failed to parse" are a single
/// unparseable-price kind; the distinction has no behavioral difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing {0} element")]
    MissingField(&'static str),
    #[error("no parseable numeric value in price text")]
    UnparseablePrice,
}

/// Parser for Amazon search result HTML.
pub struct Parser {
    usd_to_inr: f64,
}

impl Parser {
    /// Creates a new parser converting prices at the given USD→INR rate.
    pub fn new(usd_to_inr: f64) -> Self {
        Self { usd_to_inr }
    }

    /// Parses search results HTML into structured records.
    ///
    /// Containers missing a title, price, or link are skipped and counted;
    /// the scan itself never fails on malformed cards.
    pub fn parse_search(&self, html: &str, query: &str) -> Result<SearchResults> {
        let document = Html::parse_document(html);

        // Check for blocked/CAPTCHA pages first
        if document.select(&errors::CAPTCHA).next().is_some() {
            return Err(ScrapeError::Captcha.into());
        }

        let mut results = SearchResults::new(query);

        for element in document.select(&search::RESULT) {
            match self.parse_result_card(element) {
                Ok(product) => {
                    trace!("Parsed product: {}", product.title);
                    results.products.push(product);
                }
                Err(SkipReason::MissingField(field)) => {
                    debug!("Skipping result card: missing {}", field);
                    results.skipped.missing_fields += 1;
                }
                Err(SkipReason::UnparseablePrice) => {
                    warn!("Skipping result card: no numeric value found in price string");
                    results.skipped.unparseable_price += 1;
                }
            }
        }

        debug!(
            "Extracted {} products ({} skipped) for query '{}'",
            results.count(),
            results.skipped.total(),
            query
        );

        Ok(results)
    }

    /// Extracts one product record from a result container.
    fn parse_result_card(&self, element: ElementRef) -> Result<Product, SkipReason> {
        let title = element
            .select(&search::TITLE)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(SkipReason::MissingField("title"))?;

        let price_text = element
            .select(&search::PRICE)
            .next()
            .map(|e| e.text().collect::<String>())
            .ok_or(SkipReason::MissingField("price"))?;

        let href = element
            .select(&search::LINK)
            .next()
            .and_then(|e| e.value().attr("href"))
            .ok_or(SkipReason::MissingField("link"))?;

        let price_usd = parse_price_value(&price_text).ok_or(SkipReason::UnparseablePrice)?;
        let price_inr = currency::usd_to_inr(price_usd, self.usd_to_inr);

        Ok(Product { title, price_inr, link: absolute_link(href) })
    }
}

/// Extracts the first numeric substring of a price string as a value.
///
/// US thousands separators are stripped first so "$1,234.56" reads as
/// 1234.56 rather than 1.
pub fn parse_price_value(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let value = PRICE_VALUE.find(&cleaned)?.as_str().parse::<f64>().ok()?;
    Some(value)
}

/// Resolves a product href against the site origin.
fn absolute_link(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", BASE_URL, href)
    }
}
