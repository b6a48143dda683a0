//! Data models for extracted products and search results.

use crate::currency;
use serde::{Deserialize, Serialize};

/// One extracted search result: title, display price in INR, absolute link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product title text.
    pub title: String,
    /// Price converted to INR, rounded to 2 decimals.
    pub price_inr: f64,
    /// Absolute product URL.
    pub link: String,
}

/// Search price bounds in the site's native currency (USD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub low: f64,
    pub high: f64,
}

impl PriceBounds {
    /// Converts an INR price range into USD bounds at the given rate.
    pub fn from_inr(from_inr: f64, to_inr: f64, usd_to_inr: f64) -> Self {
        Self {
            low: currency::inr_to_usd(from_inr, usd_to_inr),
            high: currency::inr_to_usd(to_inr, usd_to_inr),
        }
    }
}

/// Counters for containers the extractor dropped.
///
/// Skipping is deliberate lenient policy; the counters keep it observable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipStats {
    /// Containers missing a title, price, or link sub-element.
    pub missing_fields: u32,
    /// Price fields with no parseable numeric substring.
    pub unparseable_price: u32,
}

impl SkipStats {
    /// Total number of skipped containers.
    pub fn total(&self) -> u32 {
        self.missing_fields + self.unparseable_price
    }
}

/// Search results container with skip diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// Search query used
    pub query: String,
    /// Products found, in document order
    pub products: Vec<Product>,
    /// Containers dropped during extraction
    pub skipped: SkipStats,
}

impl SearchResults {
    /// Creates new empty search results.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), products: Vec::new(), skipped: SkipStats::default() }
    }

    /// Returns number of products.
    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Returns true if no products were extracted.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_product() -> Product {
        Product {
            title: "Test Product".to_string(),
            price_inr: 2204.26,
            link: "https://www.amazon.com/dp/TEST123".to_string(),
        }
    }

    #[test]
    fn test_price_bounds_from_inr() {
        let bounds = PriceBounds::from_inr(100.0, 50000.0, 73.5);
        assert_eq!(bounds.low, 1.36);
        assert_eq!(bounds.high, 680.27);
    }

    #[test]
    fn test_price_bounds_zero_range() {
        let bounds = PriceBounds::from_inr(0.0, 0.0, 73.5);
        assert_eq!(bounds.low, 0.0);
        assert_eq!(bounds.high, 0.0);
    }

    #[test]
    fn test_skip_stats_total() {
        let stats = SkipStats { missing_fields: 3, unparseable_price: 2 };
        assert_eq!(stats.total(), 5);
        assert_eq!(SkipStats::default().total(), 0);
    }

    #[test]
    fn test_search_results() {
        let mut results = SearchResults::new("test query");
        assert_eq!(results.query, "test query");
        assert!(results.is_empty());
        assert_eq!(results.count(), 0);
        assert_eq!(results.skipped, SkipStats::default());

        results.products.push(make_test_product());
        assert!(!results.is_empty());
        assert_eq!(results.count(), 1);
    }

    #[test]
    fn test_product_serde() {
        let product = make_test_product();
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("Test Product"));
        assert!(json.contains("amazon.com"));

        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, product);
    }
}
