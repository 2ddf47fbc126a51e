//! Price history and latest prices
//!
//! Handles:
//! - Latest price per asset from time-stamped records
//! - Storage collaborator trait and in-memory store
//! - JSON-lines file-backed history

pub mod latest;
pub mod store;
pub mod history;

pub use latest::*;
pub use store::*;
pub use history::*;
