//! Fixed-rate currency conversion between INR and USD.
//!
//! The rate is a static approximation, not a live lookup. It lives in
//! [`Config::usd_to_inr`](crate::config::Config) so deployments can adjust it
//! without a rebuild.

/// Default USD to INR exchange rate, used when no config overrides it.
pub const DEFAULT_USD_TO_INR: f64 = 73.5;

/// Rounds an amount to two decimal places.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Converts an INR amount to USD at the given rate, rounded to 2 decimals.
pub fn inr_to_usd(amount: f64, usd_to_inr: f64) -> f64 {
    round2(amount / usd_to_inr)
}

/// Converts a USD amount to INR at the given rate, rounded to 2 decimals.
pub fn usd_to_inr(amount: f64, usd_to_inr: f64) -> f64 {
    round2(amount * usd_to_inr)
}
