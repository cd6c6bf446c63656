//! Error types for the dynamic_pricing crate

use thiserror::Error;

/// Custom error types for the dynamic_pricing crate
#[derive(Debug, Error)]
pub enum PricingError {
    /// Unknown item, or an item with no usable observations
    #[error("item {0} not found")]
    ItemNotFound(i64),

    /// Training was attempted with zero usable rows
    #[error("no usable training rows after assembly and filtering")]
    DataInsufficient,

    /// A price suggestion was requested before any model was trained
    #[error("no trained coefficient artifact available; run train first")]
    ModelMissing,

    /// Item price band is inverted
    #[error("invalid price band: min_price {min} exceeds max_price {max}")]
    ConstraintViolation { min: f64, max: f64 },

    /// Persisted artifact does not match the feature layout
    #[error("coefficient artifact has {found} weights, expected {expected}")]
    MalformedArtifact { found: usize, expected: usize },

    /// Error related to data validation or processing
    #[error("data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from (de)serializing the coefficient artifact
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Error from CSV ingestion
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, PricingError>;

impl From<polars::prelude::PolarsError> for PricingError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        PricingError::PolarsError(err.to_string())
    }
}
