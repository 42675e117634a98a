//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while talking to the upstream
//! statistics API or consulting the fixed lookup tables. Every variant carries
//! a stable `kind()` label so callers can surface the failure as data.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    #[error("No BLS series ID mapping found for occupation code {code}")]
    NoSeriesMapping { code: String },
    #[error("No employment projections found for occupation code {code}")]
    NoProjection { code: String },
    #[error("BLS API request failed: {0}")]
    Transport(String),
    #[error("BLS API reported failure: {0}")]
    Upstream(String),
    #[error("No data found for occupation code {code}")]
    NoData { code: String },
    #[error("Cannot decode BLS API response: {0}")]
    Decode(String),
}

impl AdapterError {
    /// Machine-readable label for the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterError::NoSeriesMapping { .. } => "no_series_mapping",
            AdapterError::NoProjection { .. } => "no_projection",
            AdapterError::Transport(_) => "transport",
            AdapterError::Upstream(_) => "upstream",
            AdapterError::NoData { .. } => "no_data",
            AdapterError::Decode(_) => "decode",
        }
    }

    /// Whether the failure comes from a lookup table rather than the network.
    pub fn is_mapping_gap(&self) -> bool {
        matches!(
            self,
            AdapterError::NoSeriesMapping { .. } | AdapterError::NoProjection { .. }
        )
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdapterError::Decode(err.to_string())
        } else {
            AdapterError::Transport(err.to_string())
        }
    }
}
