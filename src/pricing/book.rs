//! Option book: a batch of contracts priced together
//!
//! [`OptionBook::build`] parses every description and derives maturities
//! against today's date, producing column arrays in a [`PricingBatch`].
//! [`OptionBook::price_all`] looks up each asset's futures price and runs
//! Black-76 once over the whole batch.

use chrono::{NaiveDate, Utc};
use ndarray::Array1;

use crate::core::{OptionContract, PriceSnapshot, PvError, PvResult};
use crate::models::{black76, MaturityCalculator, MaturityConfig};

/// Contracts of one pricing request with their model columns
#[derive(Debug, Clone)]
pub struct PricingBatch {
    contracts: Vec<OptionContract>,
    maturities: Array1<f64>,
    is_call: Array1<bool>,
    strikes: Array1<f64>,
    as_of: NaiveDate,
}

impl PricingBatch {
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn contracts(&self) -> &[OptionContract] {
        &self.contracts
    }

    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.contracts.iter().map(|c| c.asset.as_str())
    }

    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.contracts.iter().map(|c| c.unit.as_str())
    }

    /// Years to maturity per contract
    pub fn maturities(&self) -> &Array1<f64> {
        &self.maturities
    }

    pub fn is_call(&self) -> &Array1<bool> {
        &self.is_call
    }

    pub fn strikes(&self) -> &Array1<f64> {
        &self.strikes
    }

    /// Date the maturities were measured from
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }
}

/// Builds and prices batches of option descriptions
#[derive(Debug, Clone, Default)]
pub struct OptionBook {
    maturity: MaturityCalculator,
}

impl OptionBook {
    pub fn new(config: MaturityConfig) -> Self {
        Self {
            maturity: MaturityCalculator::new(config),
        }
    }

    /// Parse descriptions and measure maturities from the current UTC date
    pub fn build<S: AsRef<str>>(&self, descriptions: &[S]) -> PvResult<PricingBatch> {
        self.build_as_of(descriptions, Utc::now().date_naive())
    }

    /// Parse descriptions and measure maturities from `today`.
    ///
    /// Fails on the first description that does not parse.
    pub fn build_as_of<S: AsRef<str>>(
        &self,
        descriptions: &[S],
        today: NaiveDate,
    ) -> PvResult<PricingBatch> {
        let contracts = descriptions
            .iter()
            .map(|text| OptionContract::parse(text.as_ref()))
            .collect::<PvResult<Vec<_>>>()?;

        let mut maturities = Vec::with_capacity(contracts.len());
        for contract in &contracts {
            let years = self
                .maturity
                .years_to_maturity(&contract.asset, contract.delivery, today)?;

            if years <= 0.0 {
                tracing::warn!(
                    "Contract {:?} has non-positive maturity {:.4}y as of {}; its PV will be NaN",
                    contract.to_string(),
                    years,
                    today
                );
            } else {
                tracing::debug!("Contract {:?} matures in {:.4}y", contract.to_string(), years);
            }
            maturities.push(years);
        }

        Ok(PricingBatch {
            maturities: Array1::from(maturities),
            is_call: contracts.iter().map(|c| c.is_call()).collect(),
            strikes: contracts.iter().map(|c| c.strike).collect(),
            contracts,
            as_of: today,
        })
    }

    /// Black-76 PV of every contract, in batch order.
    ///
    /// Every asset must be present in `prices`; otherwise nothing is priced.
    pub fn price_all(
        &self,
        batch: &PricingBatch,
        prices: &PriceSnapshot,
        rate: f64,
        vol: f64,
    ) -> PvResult<Vec<f64>> {
        let futures = batch
            .contracts
            .iter()
            .map(|c| {
                prices
                    .get(&c.asset)
                    .ok_or_else(|| PvError::missing_price(&c.asset, c.to_string()))
            })
            .collect::<PvResult<Array1<f64>>>()?;

        let pv = black76(
            futures.view(),
            batch.strikes.view(),
            batch.maturities.view(),
            rate,
            vol,
            batch.is_call.view(),
        )?;

        tracing::info!("Priced {} contracts (r={}, vol={})", batch.len(), rate, vol);
        Ok(pv.to_vec())
    }
}
