//! Configuration for the audit tool

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::constants;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

/// Store identity and currency
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_name")]
    pub name: String,
    /// Currency code or symbol used for revenue figures
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Alerting and rounding thresholds
#[derive(Debug, Deserialize)]
pub struct ThresholdConfig {
    /// Days of cover at or below which a SKU is flagged at risk
    #[serde(default = "default_at_risk_days")]
    pub at_risk_days: f64,
    /// Decimal places for percentage shares
    #[serde(default = "default_share_decimals")]
    pub share_decimals: u32,
}

fn default_store_name() -> String {
    shared::CONFIG.name.to_string()
}

fn default_currency() -> String {
    constants::DEFAULT_CURRENCY.to_string()
}

fn default_at_risk_days() -> f64 {
    wow_metrics::inventory::DEFAULT_AT_RISK_DAYS
}

fn default_share_decimals() -> u32 {
    constants::DEFAULT_SHARE_DECIMALS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            currency: default_currency(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            at_risk_days: default_at_risk_days(),
            share_decimals: default_share_decimals(),
        }
    }
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| {
            "Failed to parse config.toml. Check for:\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Incorrect data types (strings vs numbers)\n\n\
             See config.toml.example for the expected format."
        })
    }

    /// Load the file when it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config file");
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Main configuration struct with validated values
#[derive(Debug, Clone)]
pub struct Config {
    pub store_name: String,
    pub currency: String,
    /// Currency for platform subscription figures
    pub platform_currency: String,
    pub at_risk_days: f64,
    pub share_decimals: u32,
}

impl Config {
    /// Validate file config into runtime config
    pub fn from_file(file_config: &FileConfig) -> Result<Self> {
        let thresholds = &file_config.thresholds;

        if !thresholds.at_risk_days.is_finite() || thresholds.at_risk_days < 0.0 {
            anyhow::bail!(
                "thresholds.at_risk_days must be a non-negative number, got {}",
                thresholds.at_risk_days
            );
        }
        if thresholds.share_decimals > constants::MAX_SHARE_DECIMALS {
            anyhow::bail!(
                "thresholds.share_decimals must be at most {}, got {}",
                constants::MAX_SHARE_DECIMALS,
                thresholds.share_decimals
            );
        }
        if file_config.store.currency.trim().is_empty() {
            anyhow::bail!("store.currency must not be empty");
        }

        Ok(Self {
            store_name: file_config.store.name.clone(),
            currency: file_config.store.currency.clone(),
            platform_currency: shared::CONFIG.platform_currency.to_string(),
            at_risk_days: thresholds.at_risk_days,
            share_decimals: thresholds.share_decimals,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            currency: default_currency(),
            platform_currency: shared::CONFIG.platform_currency.to_string(),
            at_risk_days: default_at_risk_days(),
            share_decimals: default_share_decimals(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let file_config = FileConfig::parse("").unwrap();
        let config = Config::from_file(&file_config).unwrap();
        assert_eq!(config.currency, "EGP");
        assert_eq!(config.at_risk_days, 5.0);
        assert_eq!(config.share_decimals, 1);
        assert_eq!(config.store_name, "WoW AI");
    }

    #[test]
    fn test_partial_sections() {
        let file_config = FileConfig::parse(
            r#"
            [store]
            currency = "USD"

            [thresholds]
            at_risk_days = 7.0
            "#,
        )
        .unwrap();
        let config = Config::from_file(&file_config).unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.at_risk_days, 7.0);
        assert_eq!(config.share_decimals, 1);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let file_config = FileConfig::parse("[thresholds]\nat_risk_days = -1.0\n").unwrap();
        assert!(Config::from_file(&file_config).is_err());
    }

    #[test]
    fn test_rejects_excessive_precision() {
        let file_config = FileConfig::parse("[thresholds]\nshare_decimals = 9\n").unwrap();
        assert!(Config::from_file(&file_config).is_err());
    }

    #[test]
    fn test_rejects_blank_currency() {
        let file_config = FileConfig::parse("[store]\ncurrency = \" \"\n").unwrap();
        assert!(Config::from_file(&file_config).is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(FileConfig::parse("[store\nname = ").is_err());
    }
}
