//! # ibonds Data
//!
//! Rate-table loading for the I Bond valuation core.
//!
//! The core (`ibonds-core`) performs no I/O: it is handed a [`RateTable`]
//! already parsed into its data model. This crate is that external
//! collaborator. It parses the serialized textual form of the published rate
//! data, a JSON mapping of effective date to `[fixed, inflation]` percent
//! pair:
//!
//! ```json
//! {
//!   "2022-05-01": [0.00, 4.81],
//!   "2022-11-01": [0.40, 3.24]
//! }
//! ```
//!
//! and it ships the full published history (September 1998 through May 2023)
//! embedded at compile time, so callers get a working table without touching
//! the file system:
//!
//! ```rust
//! use ibonds_data::historical_rates;
//!
//! let table = historical_rates();
//! assert!(!table.is_empty());
//! ```
//!
//! Refreshing the data from TreasuryDirect is a separate concern for hosts
//! that need it; [`RateTable::is_current`] tells them when the embedded table
//! has gone stale.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use thiserror::Error;

use ibonds_core::{IBondError, RatePeriod, RateTable};

/// The published rate history embedded in this crate, as serialized JSON.
pub const HISTORICAL_RATES_JSON: &str = include_str!("../data/historical_rates.json");

static HISTORICAL_RATES: Lazy<Arc<RateTable>> = Lazy::new(|| {
    let table = parse_rate_table(HISTORICAL_RATES_JSON)
        .expect("embedded historical rate data is well-formed");
    tracing::debug!(
        periods = table.len(),
        "loaded embedded historical rate table"
    );
    Arc::new(table)
});

/// A specialized Result type for rate data loading.
pub type DataResult<T> = Result<T, DataError>;

/// Errors from parsing serialized rate data.
#[derive(Error, Debug)]
pub enum DataError {
    /// The input is not valid JSON in the expected shape.
    #[error("Cannot parse rate data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input parsed but does not form a valid rate table.
    #[error("Invalid rate table: {0}")]
    Table(#[from] IBondError),
}

/// Parses a serialized rate table.
///
/// The input is a JSON object mapping `YYYY-MM-DD` effective dates to
/// `[fixed, inflation]` percent pairs. Effective dates must lie on the
/// canonical rate-change calendar (May 1 / November 1 / 1998-09-01).
///
/// # Errors
///
/// Returns [`DataError::Parse`] for malformed input and [`DataError::Table`]
/// for a mapping the core rejects.
pub fn parse_rate_table(data: &str) -> DataResult<RateTable> {
    // Deserialize the raw mapping first so calendar validation failures
    // carry the core's error, not a serde one.
    let entries: BTreeMap<NaiveDate, RatePeriod> = serde_json::from_str(data)?;
    let table = RateTable::new(entries)?;
    tracing::debug!(periods = table.len(), "parsed rate table");
    Ok(table)
}

/// Returns the embedded published rate history, parsed once on first use.
///
/// Covers every rate period from the program start (September 1, 1998)
/// through May 2023.
///
/// # Panics
///
/// Panics if the embedded data is malformed, which is a defect in this
/// crate, not a runtime condition.
#[must_use]
pub fn historical_rates() -> &'static Arc<RateTable> {
    &HISTORICAL_RATES
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_rate_table() {
        let table = parse_rate_table(r#"{"2022-11-01": [0.40, 3.24]}"#).unwrap();
        let d = NaiveDate::from_ymd_opt(2022, 11, 1).unwrap();
        assert_eq!(table.fixed_rate(d).unwrap(), Some(dec!(0.40)));
        assert_eq!(table.inflation_rate(d).unwrap(), Some(dec!(3.24)));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_rate_table("not json"),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_canonical_date() {
        // Well-formed JSON with an off-calendar date must surface the core's
        // validation error as Table, not as a Parse error.
        let err = parse_rate_table(r#"{"2022-06-01": [0.40, 3.24]}"#).unwrap_err();
        assert!(matches!(
            err,
            DataError::Table(IBondError::InvalidDate { .. })
        ));
        assert!(err.to_string().contains("2022-06-01"));
    }

    #[test]
    fn test_historical_table_span() {
        let table = historical_rates();
        assert_eq!(
            table.latest_date().unwrap(),
            NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()
        );
        // Two periods per year since November 1998, plus the 1998-09 anchor.
        assert_eq!(table.len(), 51);
    }
}
