//! Error types for parameter validation, configuration and dataset output.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// A parameter is outside the domain the hazard model is defined on.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The parameters would produce a negative hazard somewhere on the timeline.
    #[error("degenerate hazard: {0}")]
    DegenerateHazard(String),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataframe error: {0}")]
    Polars(#[from] PolarsError),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
