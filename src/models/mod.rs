//! Pricing models
//!
//! Implements:
//! - Black-76 (European options on futures, flat rate and volatility)
//! - Maturity (delivery month to option expiry and year fraction)

pub mod black76;
pub mod maturity;

pub use black76::*;
pub use maturity::*;
