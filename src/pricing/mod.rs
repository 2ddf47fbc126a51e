//! Book pricing
//!
//! Ties the pieces together:
//! - PricingConfig: rate, volatility and maturity conventions
//! - OptionBook / PricingBatch: parse, derive maturities, price in one pass
//! - PricingService: upload, latest prices, end-to-end PV

pub mod book;
pub mod config;
pub mod service;

pub use book::*;
pub use config::*;
pub use service::*;
