//! Configuration for book pricing

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{PvError, PvResult};
use crate::models::MaturityConfig;

/// Model inputs shared by every contract in a pricing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Continuously compounded risk-free rate
    /// Default: 0.05
    pub risk_free_rate: f64,

    /// Flat Black-76 volatility
    /// Default: 0.20
    pub volatility: f64,

    /// Delivery-to-maturity conventions
    pub maturity: MaturityConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            volatility: 0.20,
            maturity: MaturityConfig::default(),
        }
    }
}

impl PricingConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> PvResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| PvError::config(format!("cannot read {:?}: {}", path, e)))?;

        let config: Self = serde_json::from_str(&json)
            .map_err(|e| PvError::config(format!("cannot parse {:?}: {}", path, e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PvResult<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(PvError::invalid_input("risk-free rate must be finite"));
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(PvError::invalid_input("volatility must be positive"));
        }
        let basis = self.maturity.day_count_basis;
        if !(basis.is_finite() && basis > 0.0) {
            return Err(PvError::invalid_input("day count basis must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaturityDayRule;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.risk_free_rate, 0.05);
        assert_eq!(config.volatility, 0.20);
        assert_eq!(config.maturity.offset_for("BRN"), 2);
        assert_eq!(config.maturity.offset_for("HH"), 1);
        assert_eq!(config.maturity.offset_for("WTI"), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("pricing.json");
        fs::write(
            &path,
            r#"{
                "volatility": 0.35,
                "maturity": {
                    "offsets": { "TTF": 1 },
                    "day_rule": { "last_weekday_on_or_before": { "day": 28 } }
                }
            }"#,
        )
        .unwrap();

        let config = PricingConfig::from_json_file(&path).unwrap();
        assert_eq!(config.volatility, 0.35);
        assert_eq!(config.risk_free_rate, 0.05);
        assert_eq!(config.maturity.offset_for("TTF"), 1);
        // replacing the table drops the default entries
        assert_eq!(config.maturity.offset_for("BRN"), 1);
        assert_eq!(
            config.maturity.day_rule,
            MaturityDayRule::LastWeekdayOnOrBefore { day: 28 }
        );
        assert_eq!(config.maturity.day_count_basis, 365.25);
    }

    #[test]
    fn test_invalid_values() {
        let config = PricingConfig {
            volatility: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, r#"{ "volatility": -1.0 }"#).unwrap();
        assert!(matches!(
            PricingConfig::from_json_file(&path),
            Err(PvError::InvalidInput(_))
        ));
        assert!(matches!(
            PricingConfig::from_json_file(temp_dir.path().join("missing.json")),
            Err(PvError::Config(_))
        ));
    }
}
