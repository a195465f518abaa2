use std::{path::PathBuf, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Stores user-configurable wallet and CLI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    /// Balance used when no wallet balance has been persisted yet.
    #[serde(default = "Config::default_initial_balance")]
    pub initial_balance: Decimal,
    #[serde(default = "Config::default_top_expenses")]
    pub top_expenses: usize,
    /// Minimum category share that earns a label in breakdown output.
    #[serde(default = "Config::default_label_threshold")]
    pub label_threshold: Decimal,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for wallet data. Defaults to `<home>/data`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            initial_balance: Self::default_initial_balance(),
            top_expenses: Self::default_top_expenses(),
            label_threshold: Self::default_label_threshold(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 6] = [
        "currency_symbol",
        "initial_balance",
        "top_expenses",
        "label_threshold",
        "ui_color_enabled",
        "data_root",
    ];

    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_initial_balance() -> Decimal {
        Decimal::new(5000, 0)
    }

    pub fn default_top_expenses() -> usize {
        5
    }

    pub fn default_label_threshold() -> Decimal {
        Decimal::new(5, 2)
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self, home: &std::path::Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => home.join("data"),
        }
    }

    /// Checks every field against the ranges `set` enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reason = if self.currency_symbol.trim().is_empty() {
            Some(("currency_symbol", "symbol must not be empty"))
        } else if self.initial_balance.is_sign_negative() {
            Some(("initial_balance", "must not be negative"))
        } else if self.top_expenses == 0 {
            Some(("top_expenses", "must be at least 1"))
        } else if self.label_threshold < Decimal::ZERO || self.label_threshold > Decimal::ONE {
            Some(("label_threshold", "must be between 0 and 1"))
        } else {
            None
        };
        match reason {
            Some((key, reason)) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: self.get(key)?,
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns the current value of `key` rendered as text.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "currency_symbol" => self.currency_symbol.clone(),
            "initial_balance" => self.initial_balance.to_string(),
            "top_expenses" => self.top_expenses.to_string(),
            "label_threshold" => self.label_threshold.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "data_root" => self
                .data_root
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(default)".into()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses `value` and assigns it to `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        match key {
            "currency_symbol" => {
                if value.trim().is_empty() {
                    return Err(invalid("symbol must not be empty"));
                }
                self.currency_symbol = value.trim().to_string();
            }
            "initial_balance" => {
                let amount =
                    Decimal::from_str(value.trim()).map_err(|_| invalid("expected a number"))?;
                if amount.is_sign_negative() {
                    return Err(invalid("must not be negative"));
                }
                self.initial_balance = amount;
            }
            "top_expenses" => {
                let count: usize = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid("expected a whole number"))?;
                if count == 0 {
                    return Err(invalid("must be at least 1"));
                }
                self.top_expenses = count;
            }
            "label_threshold" => {
                let share =
                    Decimal::from_str(value.trim()).map_err(|_| invalid("expected a number"))?;
                if share < Decimal::ZERO || share > Decimal::ONE {
                    return Err(invalid("must be between 0 and 1"));
                }
                self.label_threshold = share;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid("expected on/off")),
                };
            }
            "data_root" => {
                let trimmed = value.trim();
                self.data_root = if trimmed.is_empty() || trimmed == "default" {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"currency_symbol": "$"}"#).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.initial_balance, dec!(5000));
        assert_eq!(config.top_expenses, 5);
        assert_eq!(config.label_threshold, dec!(0.05));
        assert!(config.ui_color_enabled);
    }

    #[test]
    fn set_parses_typed_values() {
        let mut config = Config::default();
        config.set("initial_balance", "1200.50").unwrap();
        config.set("ui_color_enabled", "off").unwrap();
        config.set("top_expenses", "3").unwrap();
        assert_eq!(config.initial_balance, dec!(1200.50));
        assert!(!config.ui_color_enabled);
        assert_eq!(config.get("top_expenses").unwrap(), "3");
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("top_expenses", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn validate_flags_out_of_range_fields() {
        assert!(Config::default().validate().is_ok());

        let config = Config {
            label_threshold: dec!(1.5),
            ..Config::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidValue { key, value, .. }) => {
                assert_eq!(key, "label_threshold");
                assert_eq!(value, "1.5");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
