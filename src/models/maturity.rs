//! Option maturity from the delivery month
//!
//! Options on a future expire ahead of delivery. The expiry month is the
//! delivery month moved back by an asset-specific offset, and the expiry day
//! is picked inside that month by a [`MaturityDayRule`]. Both are simplified
//! stand-ins for real exchange calendars:
//! - the day rule ignores holidays;
//! - if the expiry is not after `today` it is rolled forward by one year,
//!   once only. A token more than a year stale can still give a past date.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::{DeliveryMonth, PvError, PvResult};

/// Which day of the expiry month the option matures on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityDayRule {
    /// Last Monday-Friday of the month
    LastWeekdayOfMonth,
    /// Last Monday-Friday on or before `day` (clamped to the month length)
    LastWeekdayOnOrBefore { day: u32 },
}

impl Default for MaturityDayRule {
    fn default() -> Self {
        MaturityDayRule::LastWeekdayOfMonth
    }
}

impl MaturityDayRule {
    /// Maturity day inside the given month
    pub fn maturity_day(&self, year: i32, month: u32) -> Option<NaiveDate> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;

        let mut date = match *self {
            MaturityDayRule::LastWeekdayOfMonth => last,
            MaturityDayRule::LastWeekdayOnOrBefore { day } => {
                NaiveDate::from_ymd_opt(year, month, day.clamp(1, last.day()))?
            }
        };

        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            if date == first {
                return None;
            }
            date = date.pred_opt()?;
        }

        Some(date)
    }
}

/// Delivery-to-maturity settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaturityConfig {
    /// Months between expiry and delivery, per asset
    pub offsets: BTreeMap<String, u32>,
    /// Offset for assets not listed in `offsets`
    pub default_offset: u32,
    /// Day picked inside the expiry month
    pub day_rule: MaturityDayRule,
    /// Days per year for the year fraction
    pub day_count_basis: f64,
}

impl Default for MaturityConfig {
    fn default() -> Self {
        Self {
            offsets: [("BRN".to_string(), 2), ("HH".to_string(), 1)]
                .into_iter()
                .collect(),
            default_offset: 1,
            day_rule: MaturityDayRule::default(),
            day_count_basis: 365.25,
        }
    }
}

impl MaturityConfig {
    pub fn offset_for(&self, asset: &str) -> u32 {
        self.offsets.get(asset).copied().unwrap_or(self.default_offset)
    }
}

/// Computes time to maturity for delivery months
#[derive(Debug, Clone, Default)]
pub struct MaturityCalculator {
    config: MaturityConfig,
}

impl MaturityCalculator {
    pub fn new(config: MaturityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MaturityConfig {
        &self.config
    }

    /// Expiry date of an option on `asset` delivering in `delivery`, as seen from `today`
    pub fn maturity_date(
        &self,
        asset: &str,
        delivery: DeliveryMonth,
        today: NaiveDate,
    ) -> PvResult<NaiveDate> {
        let (year, month) = delivery.months_back(self.config.offset_for(asset));
        let rule = self.config.day_rule;

        let resolve = |year: i32| {
            rule.maturity_day(year, month).ok_or_else(|| {
                PvError::invalid_input(format!(
                    "no maturity day in {}-{:02} for {} {}",
                    year, month, asset, delivery
                ))
            })
        };

        let date = resolve(year)?;
        if date > today {
            return Ok(date);
        }

        resolve(year + 1)
    }

    /// Year fraction from `today` to maturity
    pub fn years_to_maturity(
        &self,
        asset: &str,
        delivery: DeliveryMonth,
        today: NaiveDate,
    ) -> PvResult<f64> {
        let maturity = self.maturity_date(asset, delivery, today)?;
        Ok((maturity - today).num_days() as f64 / self.config.day_count_basis)
    }

    /// Year fraction from the current UTC date
    pub fn years_to_maturity_now(&self, asset: &str, delivery: DeliveryMonth) -> PvResult<f64> {
        self.years_to_maturity(asset, delivery, Utc::now().date_naive())
    }
}
