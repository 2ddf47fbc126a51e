//! Core data types for commodity option pricing
//!
//! Defines fundamental types:
//! - OptionContract: asset, delivery month, call/put, strike, unit
//! - PriceRecord / PriceSnapshot: futures price history and latest view
//! - PvError / StoreError: error taxonomy

pub mod option;
pub mod market;
pub mod error;

pub use option::*;
pub use market::*;
pub use error::*;
