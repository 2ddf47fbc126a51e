//! # Commodity PV - Black-76 pricing of commodity options
//!
//! Computes the present value of options on commodity futures from free-text
//! contract descriptions and the latest observed futures prices.
//!
//! ## Overview
//!
//! A description such as `BRN Jan24 Call Strike 100 USD/BBL` is parsed into an
//! [`OptionContract`](core::OptionContract). Its maturity is derived from the
//! delivery month with an asset-specific month offset, and the whole batch is
//! priced with Black-76 using one risk-free rate and one flat volatility.
//! Futures prices come from an append-only price history, reduced to the
//! latest price per asset.
//!
//! ## Key Components
//!
//! - **Contract parsing**: strict `<ASSET> <MONYY> <Call|Put> Strike <K> <UNIT>` grammar
//! - **Maturity**: delivery month minus offset, last weekday, one-year rollover
//! - **Black-76**: scalar and vectorized (`ndarray`) closed form
//! - **Price history**: in-memory and JSON-lines stores, latest price per asset
//! - **Service**: upload, latest prices, end-to-end PV
//!
//! ## Usage
//!
//! ```rust
//! use commodity_pv::prelude::*;
//! use chrono::NaiveDate;
//!
//! let service = PricingService::new(MemoryPriceStore::new(), PricingConfig::default()).unwrap();
//! service
//!     .upload_price_records(&[
//!         PriceRecord::new("2023-05-31 17:00:00.000000", "BRN", 101.0),
//!         PriceRecord::new("2023-05-31 17:00:00.000000", "HH", 9.0),
//!     ])
//!     .unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
//! let pv = service
//!     .calculate_pv_as_of(
//!         &["BRN Jan24 Call Strike 100 USD/BBL", "HH Mar24 Put Strike 10 USD/MMBTu"],
//!         today,
//!     )
//!     .unwrap();
//! assert_eq!(pv.len(), 2);
//! ```
//!
//! ## Known Simplifications
//!
//! - Expiry day is the last weekday of the expiry month; holidays are ignored
//! - An expired maturity is rolled forward by one year, once
//! - Zero maturity or zero volatility is not guarded and yields NaN

pub mod core;
pub mod data;
pub mod models;
pub mod pricing;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        DeliveryMonth, OptionContract, OptionType, PriceRecord, PriceSnapshot, PvError,
        PvResult, StoreError,
    };

    // Price history
    pub use crate::data::{latest, MemoryPriceStore, PriceHistory, PriceStore};

    // Models
    pub use crate::models::{
        black76, black76_price, norm_cdf, MaturityCalculator, MaturityConfig, MaturityDayRule,
    };

    // Pricing
    pub use crate::pricing::{OptionBook, PricingBatch, PricingConfig, PricingService};
}

// Re-export main types at crate root
pub use crate::core::{PvError, PvResult};
pub use crate::pricing::{OptionBook, PricingConfig, PricingService};
