//! Market data for the underlying futures
//!
//! Price records are append-only `(timestamp, asset, price)` rows. A
//! [`PriceSnapshot`] is the latest price per asset derived from them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used for generated records; lexicographic order matches time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One observed futures price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Sortable timestamp (ISO-8601-like). Compared as a string.
    pub timestamp: String,
    /// Asset code
    pub asset: String,
    /// Futures price
    pub price: f64,
}

impl PriceRecord {
    pub fn new(timestamp: impl Into<String>, asset: impl Into<String>, price: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            asset: asset.into(),
            price,
        }
    }

    /// Record stamped at the given instant
    pub fn at(time: DateTime<Utc>, asset: impl Into<String>, price: f64) -> Self {
        Self::new(time.format(TIMESTAMP_FORMAT).to_string(), asset, price)
    }

    /// Record stamped now
    pub fn now(asset: impl Into<String>, price: f64) -> Self {
        Self::at(Utc::now(), asset, price)
    }

    /// Reason the record can't be stored, if any
    pub fn validate(&self) -> Result<(), String> {
        if self.timestamp.trim().is_empty() {
            return Err("empty timestamp".into());
        }
        if self.asset.trim().is_empty() {
            return Err("empty asset".into());
        }
        if !self.price.is_finite() {
            return Err(format!("non-finite price {}", self.price));
        }
        Ok(())
    }
}

/// Latest futures price per asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSnapshot {
    prices: BTreeMap<String, f64>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: impl Into<String>, price: f64) -> Option<f64> {
        self.prices.insert(asset.into(), price)
    }

    pub fn get(&self, asset: &str) -> Option<f64> {
        self.prices.get(asset).copied()
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.prices.contains_key(asset)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Assets in sorted order with their prices
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(asset, price)| (asset.as_str(), *price))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(a, p)| (a.into(), p)).collect(),
        }
    }
}
