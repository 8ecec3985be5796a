//! Core error types.

use thiserror::Error;

/// Errors raised while interpreting raw values.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Parse a date in ISO format (`2024-03-01`).
pub fn parse_date(raw: &str) -> CoreResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// Parse a decimal number.
pub fn parse_number(raw: &str) -> CoreResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoreError::InvalidNumber(raw.to_string()))
}
