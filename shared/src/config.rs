use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Locale settings handed to the external currency formatter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CurrencyConfig {
    /// BCP 47 locale tag, e.g. "ar-SY"
    pub locale: String,
    /// ISO 4217 currency code, e.g. "SYP"
    pub currency: String,
    pub minimum_fraction_digits: u8,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            locale: "ar-SY".to_string(),
            currency: "SYP".to_string(),
            minimum_fraction_digits: 2,
        }
    }
}

/// Timing and limits for the page behaviors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BehaviorConfig {
    pub search_debounce_ms: u32,
    pub alert_ttl_ms: u32,
    pub clock_refresh_ms: u32,
    pub button_click_ms: u32,
    /// Animation delay added per card, in seconds
    pub card_stagger_secs: f64,
    pub max_export_records: usize,
    /// One of "error", "warn", "info", "debug", "trace", "off"
    pub log_level: String,
    pub currency: CurrencyConfig,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            alert_ttl_ms: 5000,
            clock_refresh_ms: 60_000,
            button_click_ms: 200,
            card_stagger_secs: 0.1,
            max_export_records: 10_000,
            log_level: "info".to_string(),
            currency: CurrencyConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid behavior config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BehaviorConfig {
    /// Parse a config document. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = BehaviorConfig::default();
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.alert_ttl_ms, 5000);
        assert_eq!(config.clock_refresh_ms, 60_000);
        assert_eq!(config.max_export_records, 10_000);
        assert_eq!(config.currency.locale, "ar-SY");
        assert_eq!(config.currency.currency, "SYP");
        assert_eq!(config.currency.minimum_fraction_digits, 2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BehaviorConfig::from_json(
            r#"{"search_debounce_ms": 150, "currency": {"currency": "USD"}}"#,
        )
        .unwrap();
        assert_eq!(config.search_debounce_ms, 150);
        assert_eq!(config.alert_ttl_ms, 5000);
        assert_eq!(config.currency.currency, "USD");
        assert_eq!(config.currency.locale, "ar-SY");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(BehaviorConfig::from_json("{not json").is_err());
        assert!(BehaviorConfig::from_json(r#"{"alert_ttl_ms": "soon"}"#).is_err());
    }
}
