//! Error types for I Bond valuation.
//!
//! Two failure families exist: invalid input (a date the program rules reject
//! outright) and lookup failure (a well-formed request over a rate table that
//! does not cover the date the computation needs).

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized Result type for I Bond operations.
pub type IBondResult<T> = Result<T, IBondError>;

/// The main error type for I Bond operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IBondError {
    /// A date argument the I Bond program rules reject.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A required rate is not present in the rate table.
    ///
    /// The request was well-formed; the backing data is incomplete.
    #[error("No rate available for {date}")]
    RateUnavailable {
        /// Rate-change date the table does not cover.
        date: NaiveDate,
    },

    /// A query that needs at least one rate entry ran against an empty table.
    #[error("Rate table is empty")]
    EmptyTable,

    /// Invalid bond specification (issue month out of range, etc.).
    #[error("Invalid bond specification: {reason}")]
    InvalidBondSpec {
        /// Description of what's invalid.
        reason: String,
    },
}

impl IBondError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a rate unavailable error.
    #[must_use]
    pub fn rate_unavailable(date: NaiveDate) -> Self {
        Self::RateUnavailable { date }
    }

    /// Creates an invalid bond specification error.
    #[must_use]
    pub fn invalid_bond_spec(reason: impl Into<String>) -> Self {
        Self::InvalidBondSpec {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IBondError::invalid_date("1990-01-01 is before the program start");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_rate_unavailable_display() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let err = IBondError::rate_unavailable(date);
        assert!(err.to_string().contains("2025-05-01"));
    }
}
