//! CSS selectors for Amazon search result pages.
//!
//! This file contains all CSS selectors used for parsing search pages.
//! Update this file when Amazon changes their HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use regex_lite::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for search results pages.
pub mod search {
    use super::*;

    /// Product card container - main search result item.
    pub static RESULT: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "[data-component-type='s-search-result'], \
             div.s-result-item[data-asin]",
        )
        .unwrap()
    });

    /// Product title text.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "h2 a span, \
             h2 span.a-text-normal, \
             h2",
        )
        .unwrap()
    });

    /// Offscreen price text (most reliable price source).
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".a-price:not([data-a-strike]) .a-offscreen, \
             span.a-offscreen",
        )
        .unwrap()
    });

    /// Product link for URL extraction.
    pub static LINK: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "h2 a.a-link-normal, \
             a.a-link-normal",
        )
        .unwrap()
    });
}

/// Selectors for detecting error/captcha pages.
pub mod errors {
    use super::*;

    /// CAPTCHA form.
    pub static CAPTCHA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "form[action*='validateCaptcha'], \
             img[src*='captcha']",
        )
        .unwrap()
    });
}

/// First numeric substring of a price string, integer or decimal.
pub static PRICE_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").unwrap());
