use thiserror::Error;

use super::features::MIN_YEAR_OF_MANUFACTURE;

/// Errors raised while validating an inbound car description.
/// Every variant names the offending wire field so the caller can
/// surface it directly in the HTTP error body.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Engine size must be greater than 0 (got {value})")]
    EngineSizeNotPositive { value: f64 },

    #[error("Year of manufacture must be {MIN_YEAR_OF_MANUFACTURE} or later (got {value})")]
    YearBeforeMinimum { value: i32 },

    #[error("Mileage must be non-negative (got {value})")]
    MileageNegative { value: f64 },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Errors raised when serving a prediction request.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Model not loaded. Please check server logs and try again later.")]
    ModelUnavailable,

    #[error("Prediction failed: {reason}")]
    Failed { reason: String },
}
