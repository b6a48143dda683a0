//! amz-desk - Amazon product search desktop app
//!
//! Searches amazon.com for products inside an INR price range, exports the
//! results to a styled XLSX spreadsheet, and displays them in an egui form.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod currency;
pub mod export;
pub mod gui;

pub use amazon::models::{PriceBounds, Product, SearchResults};
pub use amazon::ScrapeError;
pub use config::Config;
