//! Error types for commodity option pricing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PvError {
    #[error("Unable to parse option {input:?}: {reason}")]
    Parse { input: String, reason: String },

    #[error("No latest price for asset {asset:?} (contract {contract:?})")]
    MissingPrice { asset: String, contract: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Failures of the price history collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Rejected record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Corrupt history at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type PvResult<T> = Result<T, PvError>;

impl PvError {
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_price(asset: impl Into<String>, contract: impl Into<String>) -> Self {
        Self::MissingPrice {
            asset: asset.into(),
            contract: contract.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
