//! Month-granularity date type for accrual arithmetic.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IBondError, IBondResult};

/// A (year, month) pair for month-level accrual arithmetic.
///
/// I Bond interest accrues monthly and compounds semiannually, so the
/// valuation walk only ever cares about whole months; days never enter the
/// arithmetic. `YearMonth` is an immutable value type with named methods
/// rather than operator overloads.
///
/// # Example
///
/// ```rust
/// use ibonds_core::types::YearMonth;
///
/// let issue = YearMonth::new(2022, 11).unwrap();
/// let next = issue.add_months(6);
/// assert_eq!(next, YearMonth::new(2023, 5).unwrap());
/// assert_eq!(next.months_since(issue), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a new `YearMonth`.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if the month is not in 1..=12.
    pub fn new(year: i32, month: u32) -> IBondResult<Self> {
        if month < 1 || month > 12 {
            return Err(IBondError::invalid_date(format!(
                "month {month} is not in 1..=12"
            )));
        }
        Ok(Self { year, month })
    }

    /// Creates a `YearMonth` from the year and month of a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Adds a number of months, normalizing month and year.
    ///
    /// Negative values move backward. Normalization uses floor division on
    /// the zero-based month, so crossing a year boundary in either direction
    /// behaves uniformly.
    #[must_use]
    pub fn add_months(&self, months: i32) -> Self {
        let total = self.year * 12 + self.month as i32 - 1 + months;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// Returns the signed number of months from `other` to `self`.
    ///
    /// Positive when `self` is later than `other`.
    #[must_use]
    pub fn months_since(&self, other: YearMonth) -> i32 {
        (self.year - other.year) * 12 + (self.month as i32 - other.month as i32)
    }

    /// Converts to the first calendar day of the month.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month is validated at construction")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_invalid_month() {
        assert!(YearMonth::new(2023, 0).is_err());
        assert!(YearMonth::new(2023, 13).is_err());
    }

    #[test]
    fn test_months_since() {
        assert_eq!(ym(2023, 5).months_since(ym(2023, 3)), 2);
        assert_eq!(ym(2023, 1).months_since(ym(2022, 12)), 1);
        assert_eq!(ym(2023, 1).months_since(ym(2018, 1)), 12 * 5);
        assert_eq!(ym(2023, 1).months_since(ym(2023, 12)), -11);
    }

    #[test]
    fn test_add_months() {
        assert_eq!(ym(2022, 1).add_months(11), ym(2022, 12));
        assert_eq!(ym(2022, 12).add_months(1), ym(2023, 1));
        assert_eq!(ym(2022, 11).add_months(6), ym(2023, 5));
    }

    #[test]
    fn test_add_months_backward() {
        assert_eq!(ym(2023, 1).add_months(-1), ym(2022, 12));
        assert_eq!(ym(2023, 3).add_months(-15), ym(2021, 12));
        assert_eq!(ym(2023, 7).add_months(-4), ym(2023, 3));
    }

    #[test]
    fn test_first_day() {
        let date = ym(2022, 12).first_day();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 12, 1).unwrap());
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2023, 4, 17).unwrap();
        assert_eq!(YearMonth::from_date(date), ym(2023, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(ym(1998, 9).to_string(), "1998-09");
    }
}
