//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::currency::DEFAULT_USD_TO_INR;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default output spreadsheet name.
pub const DEFAULT_OUTPUT_FILE: &str = "amazon_products.xlsx";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed USD to INR exchange rate used for price bounds and display.
    #[serde(default = "default_usd_to_inr")]
    pub usd_to_inr: f64,

    /// Output spreadsheet path.
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,
}

fn default_usd_to_inr() -> f64 {
    DEFAULT_USD_TO_INR
}

fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            usd_to_inr: default_usd_to_inr(),
            output_file: default_output_file(),
            proxy: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-desk").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(rate) = std::env::var("AMZ_DESK_RATE") {
            if let Ok(r) = rate.parse::<f64>() {
                if r > 0.0 {
                    self.usd_to_inr = r;
                }
            }
        }

        if let Ok(output) = std::env::var("AMZ_DESK_OUTPUT") {
            self.output_file = output;
        }

        if let Ok(proxy) = std::env::var("AMZ_DESK_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.usd_to_inr, DEFAULT_USD_TO_INR);
        assert_eq!(config.output_file, "amazon_products.xlsx");
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            usd_to_inr = 82.3
            output_file = "results.xlsx"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.usd_to_inr, 82.3);
        assert_eq!(config.output_file, "results.xlsx");
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_config_from_toml_partial() {
        let config: Config = toml::from_str(r#"proxy = "socks5://localhost:1080""#).unwrap();
        assert_eq!(config.usd_to_inr, DEFAULT_USD_TO_INR);
        assert_eq!(config.output_file, "amazon_products.xlsx");
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            usd_to_inr = 75.0
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.usd_to_inr, 75.0);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            output_file = "deals.xlsx"
            "#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.output_file, "deals.xlsx");
    }

    #[test]
    fn test_config_with_env() {
        let orig_rate = std::env::var("AMZ_DESK_RATE").ok();
        let orig_output = std::env::var("AMZ_DESK_OUTPUT").ok();

        std::env::set_var("AMZ_DESK_RATE", "80.5");
        std::env::set_var("AMZ_DESK_OUTPUT", "env.xlsx");

        let config = Config::new().with_env();
        assert_eq!(config.usd_to_inr, 80.5);
        assert_eq!(config.output_file, "env.xlsx");

        match orig_rate {
            Some(v) => std::env::set_var("AMZ_DESK_RATE", v),
            None => std::env::remove_var("AMZ_DESK_RATE"),
        }
        match orig_output {
            Some(v) => std::env::set_var("AMZ_DESK_OUTPUT", v),
            None => std::env::remove_var("AMZ_DESK_OUTPUT"),
        }
    }

    #[test]
    fn test_config_with_env_invalid_rate() {
        let orig_rate = std::env::var("AMZ_DESK_RATE").ok();

        std::env::set_var("AMZ_DESK_RATE", "not_a_number");
        let config = Config::new().with_env();
        assert_eq!(config.usd_to_inr, DEFAULT_USD_TO_INR);

        std::env::set_var("AMZ_DESK_RATE", "-3.0");
        let config = Config::new().with_env();
        assert_eq!(config.usd_to_inr, DEFAULT_USD_TO_INR);

        match orig_rate {
            Some(v) => std::env::set_var("AMZ_DESK_RATE", v),
            None => std::env::remove_var("AMZ_DESK_RATE"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            usd_to_inr: 74.25,
            output_file: "out.xlsx".to_string(),
            proxy: Some("socks5://localhost:1080".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.usd_to_inr, config.usd_to_inr);
        assert_eq!(parsed.output_file, config.output_file);
        assert_eq!(parsed.proxy, config.proxy);
    }
}
