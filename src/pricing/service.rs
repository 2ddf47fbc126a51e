//! Pricing service
//!
//! The operations exposed to a transport layer: upload price records, read
//! the latest prices, and price a list of option descriptions end to end.
//! The service owns its store handle; nothing here retries or times out.

use chrono::{NaiveDate, Utc};

use crate::core::{PriceRecord, PriceSnapshot, PvResult};
use crate::data::PriceStore;

use super::book::OptionBook;
use super::config::PricingConfig;

pub struct PricingService<S: PriceStore> {
    store: S,
    config: PricingConfig,
    book: OptionBook,
}

impl<S: PriceStore> PricingService<S> {
    pub fn new(store: S, config: PricingConfig) -> PvResult<Self> {
        config.validate()?;
        let book = OptionBook::new(config.maturity.clone());
        Ok(Self { store, config, book })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the store handle
    pub fn into_store(self) -> S {
        self.store
    }

    /// Append records to the price history, all or nothing
    pub fn upload_price_records(&self, records: &[PriceRecord]) -> PvResult<()> {
        self.store.upload(records)?;
        Ok(())
    }

    /// Latest price per asset
    pub fn fetch_latest_prices(&self) -> PvResult<PriceSnapshot> {
        let snapshot = self.store.latest_prices()?;
        tracing::info!("Fetched latest prices for {} assets", snapshot.len());
        Ok(snapshot)
    }

    /// PV per description, in input order
    pub fn calculate_pv<T: AsRef<str>>(&self, descriptions: &[T]) -> PvResult<Vec<f64>> {
        self.calculate_pv_as_of(descriptions, Utc::now().date_naive())
    }

    /// PV per description with maturities measured from `today`
    pub fn calculate_pv_as_of<T: AsRef<str>>(
        &self,
        descriptions: &[T],
        today: NaiveDate,
    ) -> PvResult<Vec<f64>> {
        let batch = self.book.build_as_of(descriptions, today)?;
        let prices = self.fetch_latest_prices()?;

        self.book.price_all(
            &batch,
            &prices,
            self.config.risk_free_rate,
            self.config.volatility,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PvError, StoreError};
    use crate::data::{MemoryPriceStore, PriceHistory};
    use tempfile::tempdir;

    const BOOK: [&str; 2] = [
        "BRN Jan24 Call Strike 100 USD/BBL",
        "HH Mar24 Put Strike 10 USD/MMBTu",
    ];

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    fn service() -> PricingService<MemoryPriceStore> {
        let service = PricingService::new(MemoryPriceStore::new(), PricingConfig::default()).unwrap();
        service
            .upload_price_records(&[
                PriceRecord::new("2023-05-31 09:00:00.000000", "BRN", 95.0),
                PriceRecord::new("2023-05-31 17:00:00.000000", "BRN", 101.0),
                PriceRecord::new("2023-05-31 12:00:00.000000", "HH", 9.0),
            ])
            .unwrap();
        service
    }

    #[test]
    fn test_end_to_end_uses_latest_prices() {
        let service = service();
        let pv = service.calculate_pv_as_of(&BOOK, today()).unwrap();

        assert_eq!(pv.len(), 2);
        assert!((pv[0] - 6.0179).abs() < 1e-3);
        assert!(pv[1] > 0.0);
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let service = service();
        let first = service.calculate_pv_as_of(&BOOK, today()).unwrap();
        let second = service.calculate_pv_as_of(&BOOK, today()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_follows_input_order() {
        let service = service();
        let forward = service.calculate_pv_as_of(&BOOK, today()).unwrap();
        let reversed = service
            .calculate_pv_as_of(&[BOOK[1], BOOK[0]], today())
            .unwrap();
        assert_eq!(forward, vec![reversed[1], reversed[0]]);
    }

    #[test]
    fn test_missing_asset_prices_nothing() {
        let service = service();
        let result = service.calculate_pv_as_of(
            &[BOOK[0], "TTF Feb24 Call Strike 40 EUR/MWh", BOOK[1]],
            today(),
        );
        assert!(matches!(result, Err(PvError::MissingPrice { ref asset, .. }) if asset == "TTF"));
    }

    #[test]
    fn test_parse_error_aborts_batch() {
        let service = service();
        let result = service.calculate_pv_as_of(&[BOOK[0], "BRN Jan24 Call 100 USD/BBL"], today());
        assert!(matches!(result, Err(PvError::Parse { .. })));
    }

    #[test]
    fn test_store_errors_surface() {
        let service = service();
        let result = service.upload_price_records(&[PriceRecord::new("", "BRN", 1.0)]);
        assert!(matches!(
            result,
            Err(PvError::Store(StoreError::InvalidRecord { index: 0, .. }))
        ));
    }

    #[test]
    fn test_file_backed_service() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("history.jsonl");

        let service =
            PricingService::new(PriceHistory::open(&path).unwrap(), PricingConfig::default()).unwrap();
        service
            .upload_price_records(&[
                PriceRecord::new("2023-05-31 17:00:00.000000", "BRN", 101.0),
                PriceRecord::new("2023-05-31 12:00:00.000000", "HH", 9.0),
            ])
            .unwrap();
        let expected = service.calculate_pv_as_of(&BOOK, today()).unwrap();
        service.into_store().close().unwrap();

        let reopened =
            PricingService::new(PriceHistory::open(&path).unwrap(), PricingConfig::default()).unwrap();
        assert_eq!(reopened.calculate_pv_as_of(&BOOK, today()).unwrap(), expected);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PricingConfig {
            volatility: f64::NAN,
            ..Default::default()
        };
        assert!(PricingService::new(MemoryPriceStore::new(), config).is_err());
    }
}
