//! The I Bond instrument and its valuation.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{IBondError, IBondResult};
use crate::rates::{program_start, RateTable};
use crate::types::YearMonth;

/// Interest stops accruing 30 years after issue.
const ACCRUAL_CAP_MONTHS: i32 = 12 * 30;

/// Redeeming before 5 years forfeits the last 3 months of interest.
const PENALTY_HOLDING_MONTHS: i32 = 12 * 5;
const PENALTY_MONTHS: i32 = 3;

/// A U.S. Series I Savings Bond.
///
/// A bond is issued in a given month (I Bonds have month granularity; the
/// issue day is always the 1st) with a face-value denomination, and holds a
/// shared read-only reference to the rate table it is valued against. The
/// bond itself is stateless: every query is a pure function of the issue
/// date, the denomination, and the table contents.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use ibonds_core::{IBond, RatePeriod, RateTable};
///
/// let table = Arc::new(RateTable::from_entries([
///     (
///         NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
///         RatePeriod::new(dec!(0.00), dec!(4.81)),
///     ),
/// ])?);
///
/// let bond = IBond::new(6, 2022, dec!(1000), table)?;
/// let issue = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
/// assert_eq!(bond.value(issue)?, dec!(1000));
/// # Ok::<(), ibonds_core::IBondError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IBond {
    issue_date: YearMonth,
    denomination: Decimal,
    rates: Arc<RateTable>,
}

impl IBond {
    /// Creates a bond issued in the given month and year.
    ///
    /// Denominations are conceptually multiples of $25; this is not
    /// enforced.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidBondSpec` if the issue month is not in
    /// 1..=12, or `IBondError::InvalidDate` if the issue date is before
    /// September 1998.
    pub fn new(
        issue_month: u32,
        issue_year: i32,
        denomination: Decimal,
        rates: Arc<RateTable>,
    ) -> IBondResult<Self> {
        let issue_date = YearMonth::new(issue_year, issue_month)
            .map_err(|_| IBondError::invalid_bond_spec(format!(
                "issue month {issue_month} is not in 1..=12"
            )))?;
        if issue_date.first_day() < program_start() {
            return Err(IBondError::invalid_date(format!(
                "issue date {issue_date} is before the I Bond program start {}",
                program_start()
            )));
        }
        Ok(Self {
            issue_date,
            denomination,
            rates,
        })
    }

    /// Returns the issue date (always the 1st of the issue month).
    #[must_use]
    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date.first_day()
    }

    /// Returns the face-value denomination.
    #[must_use]
    pub fn denomination(&self) -> Decimal {
        self.denomination
    }

    /// Returns the bond's fixed rate (in percent).
    ///
    /// The fixed rate is set at issue and constant for the bond's life.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::RateUnavailable` if the table does not cover the
    /// issue date: a bond's fixed rate must exist, so absence is a hard
    /// failure rather than a probe result.
    pub fn fixed_rate(&self) -> IBondResult<Decimal> {
        let issue = self.issue_date();
        self.rates
            .fixed_rate(issue)?
            .ok_or_else(|| IBondError::rate_unavailable(issue))
    }

    /// Returns the bond's composite rate (in percent) on `as_of`, or `None`
    /// if the table does not cover the bond's current rate epoch.
    ///
    /// The composite rate tracks the bond's own semiannual cycle, anchored
    /// to the issue month, not the calendar rate-change cycle: a bond issued
    /// in January changes rates every January 1 and July 1, picking up the
    /// rates published the preceding November and May.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::RateUnavailable` if the fixed rate itself is
    /// missing from the table.
    pub fn composite_rate(&self, as_of: NaiveDate) -> IBondResult<Option<Decimal>> {
        let current = YearMonth::from_date(as_of);
        let age_months = current.months_since(self.issue_date);
        let epoch_start = current.add_months(-age_months.rem_euclid(6));
        self.rates
            .composite_rate(self.fixed_rate()?, epoch_start.first_day())
    }

    /// Returns the bond's redemption value on `as_of`.
    ///
    /// Values are computed per the published rules: a normalized $25 unit
    /// compounds semiannually from the issue month, rounding to the cent at
    /// every step; a final 1-5 month stub compounds with a fractional
    /// exponent; redemption under 5 years forfeits the last 3 months of
    /// interest; nothing accrues past 30 years. The result scales by
    /// denomination / 25.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if `as_of` is before the issue
    /// date, and `IBondError::RateUnavailable` if the table is missing any
    /// rate the walk needs.
    pub fn value(&self, as_of: NaiveDate) -> IBondResult<Decimal> {
        if as_of < self.issue_date() {
            return Err(IBondError::invalid_date(format!(
                "cannot compute value on {as_of}, before the issue date {}",
                self.issue_date()
            )));
        }

        let mut unit_value = dec!(25.00);
        let mut step = self.issue_date;
        let mut months_left = YearMonth::from_date(as_of)
            .months_since(step)
            .min(ACCRUAL_CAP_MONTHS);

        if months_left < PENALTY_HOLDING_MONTHS {
            months_left = (months_left - PENALTY_MONTHS).max(0);
        }

        // Interest accrues monthly and compounds semiannually; the rate for
        // each 6-month period is the bond's composite rate at its start.
        while months_left >= 6 {
            let rate = self.step_rate(step)?;
            unit_value = round_cents(unit_value * (Decimal::ONE + rate / dec!(200)));
            step = step.add_months(6);
            months_left -= 6;
        }

        if months_left > 0 {
            // Partial final period: same rate, fractional exponent.
            let rate = self.step_rate(step)?;
            let growth = (Decimal::ONE + rate / dec!(200))
                .powd(Decimal::from(months_left) / dec!(6));
            unit_value = round_cents(unit_value * growth);
        }

        Ok(unit_value * self.denomination / dec!(25))
    }

    /// Composite rate at a step of the valuation walk. Steps are whole
    /// epochs from the issue month, so absence here means the table simply
    /// does not cover the period, which fails the whole valuation.
    fn step_rate(&self, step: YearMonth) -> IBondResult<Decimal> {
        self.composite_rate(step.first_day())?
            .ok_or_else(|| IBondError::rate_unavailable(step.first_day()))
    }
}

/// Rounds a dollar amount to the cent, half to even.
fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}
