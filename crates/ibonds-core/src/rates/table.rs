//! Immutable table of published fixed and inflation rates.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{IBondError, IBondResult};

/// First date of the I Bond program (September 1, 1998).
///
/// The inaugural rates ran from this date through October 31, 1998; every
/// later rate period starts on a May 1 or a November 1.
#[must_use]
pub fn program_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1998, 9, 1).expect("1998-09-01 is a valid date")
}

/// One published rate period: the fixed and inflation rates that took effect
/// on a rate-change date.
///
/// Both components are decimal percentages: `0.40` means 0.40%. The fixed
/// rate applies for the life of any bond issued while the period governs; the
/// inflation rate is the semiannual rate for the period itself.
///
/// Serializes as a `[fixed, inflation]` pair, the layout of the published
/// data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Decimal, Decimal)", into = "(Decimal, Decimal)")]
pub struct RatePeriod {
    /// Fixed rate component, in percent.
    pub fixed_rate: Decimal,
    /// Semiannual inflation rate component, in percent.
    pub inflation_rate: Decimal,
}

impl RatePeriod {
    /// Creates a new rate period from fixed and inflation percentages.
    #[must_use]
    pub fn new(fixed_rate: Decimal, inflation_rate: Decimal) -> Self {
        Self {
            fixed_rate,
            inflation_rate,
        }
    }
}

impl From<(Decimal, Decimal)> for RatePeriod {
    fn from((fixed_rate, inflation_rate): (Decimal, Decimal)) -> Self {
        Self::new(fixed_rate, inflation_rate)
    }
}

impl From<RatePeriod> for (Decimal, Decimal) {
    fn from(period: RatePeriod) -> Self {
        (period.fixed_rate, period.inflation_rate)
    }
}

/// Historical table of published I Bond rates, keyed by effective date.
///
/// The table is built once from externally supplied data and never mutated.
/// It answers "which rate period covers date D" by snapping D back to the
/// latest canonical rate-change date, then looking that date up. A missing
/// entry is reported as an explicit absence (`Ok(None)`), never as a zero
/// rate: the caller decides whether incomplete data is fatal.
///
/// Construction rejects any key that is not on the canonical rate-change
/// calendar (May 1 / November 1 / the 1998-09-01 anchor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<NaiveDate, RatePeriod>",
    into = "BTreeMap<NaiveDate, RatePeriod>"
)]
pub struct RateTable {
    entries: BTreeMap<NaiveDate, RatePeriod>,
}

impl RateTable {
    /// Creates a rate table from a mapping of effective date to rate period.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if any key is not a canonical
    /// rate-change date.
    pub fn new(entries: BTreeMap<NaiveDate, RatePeriod>) -> IBondResult<Self> {
        for &date in entries.keys() {
            if !is_rate_change_date(date) {
                return Err(IBondError::invalid_date(format!(
                    "{date} is not a rate-change date (May 1, Nov 1, or 1998-09-01)"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Creates a rate table from an iterator of (effective date, period)
    /// pairs.
    ///
    /// Later pairs overwrite earlier ones with the same date.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if any date is not a canonical
    /// rate-change date.
    pub fn from_entries<I>(entries: I) -> IBondResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, RatePeriod)>,
    {
        Self::new(entries.into_iter().collect())
    }

    /// Returns the latest canonical rate-change date on or before `d`.
    ///
    /// Dates before November 1, 1998 snap to the September 1, 1998 anchor.
    /// Otherwise: January through April snap to November 1 of the prior
    /// year, May through October to May 1, November and December to
    /// November 1.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if `d` is before the program start.
    pub fn previous_rate_date(d: NaiveDate) -> IBondResult<NaiveDate> {
        if d < program_start() {
            return Err(IBondError::invalid_date(format!(
                "{d} is before the I Bond program start {}",
                program_start()
            )));
        }
        if d < NaiveDate::from_ymd_opt(1998, 11, 1).expect("valid date") {
            return Ok(program_start());
        }

        let date = match d.month() {
            1..=4 => NaiveDate::from_ymd_opt(d.year() - 1, 11, 1),
            5..=10 => NaiveDate::from_ymd_opt(d.year(), 5, 1),
            _ => NaiveDate::from_ymd_opt(d.year(), 11, 1),
        };
        Ok(date.expect("first of month is always valid"))
    }

    /// Returns the latest effective date present in the table.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::EmptyTable` if the table has no entries.
    pub fn latest_date(&self) -> IBondResult<NaiveDate> {
        self.entries
            .keys()
            .next_back()
            .copied()
            .ok_or(IBondError::EmptyTable)
    }

    /// Checks whether the table still covers the current rate period.
    ///
    /// True iff the rate period in effect `within_days` days before `today`
    /// is present. Loaders use this to decide whether a refresh of the
    /// published data is warranted; valuation never calls it. `today` is an
    /// explicit parameter so each caller evaluates it at call time.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if the probed date falls before the
    /// program start.
    pub fn is_current(&self, within_days: i64, today: NaiveDate) -> IBondResult<bool> {
        let last = today - Duration::days(within_days);
        Ok(self.entries.contains_key(&Self::previous_rate_date(last)?))
    }

    /// Returns the fixed rate (in percent) in effect on date `d`, or `None`
    /// if the covering period is not in the table.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if `d` is before the program start.
    pub fn fixed_rate(&self, d: NaiveDate) -> IBondResult<Option<Decimal>> {
        Ok(self.period(d)?.map(|p| p.fixed_rate))
    }

    /// Returns the inflation rate (in percent) in effect on date `d`, or
    /// `None` if the covering period is not in the table.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if `d` is before the program start.
    pub fn inflation_rate(&self, d: NaiveDate) -> IBondResult<Option<Decimal>> {
        Ok(self.period(d)?.map(|p| p.inflation_rate))
    }

    /// Returns the composite rate (in percent) for a bond with the given
    /// fixed rate, using the inflation rate in effect on date `d`.
    ///
    /// The composite rate is `(f + 2i + f*i) * 100` with `f` and `i` the
    /// fractional fixed and inflation rates, floored at zero (the composite
    /// rate is never negative) and rounded half-to-even to two decimals.
    /// Returns `None` when the inflation rate is absent; an inflation rate of
    /// exactly zero is a present value.
    ///
    /// # Errors
    ///
    /// Returns `IBondError::InvalidDate` if `d` is before the program start.
    pub fn composite_rate(
        &self,
        fixed_rate_pct: Decimal,
        d: NaiveDate,
    ) -> IBondResult<Option<Decimal>> {
        let Some(inflation_pct) = self.inflation_rate(d)? else {
            return Ok(None);
        };

        let f = fixed_rate_pct / dec!(100);
        let i = inflation_pct / dec!(100);
        let rate = (f + dec!(2) * i + f * i) * dec!(100);

        if rate <= Decimal::ZERO {
            return Ok(Some(Decimal::ZERO));
        }
        Ok(Some(rate.round_dp_with_strategy(
            2,
            RoundingStrategy::MidpointNearestEven,
        )))
    }

    /// Returns the number of rate periods in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn period(&self, d: NaiveDate) -> IBondResult<Option<RatePeriod>> {
        let effective = Self::previous_rate_date(d)?;
        Ok(self.entries.get(&effective).copied())
    }
}

impl TryFrom<BTreeMap<NaiveDate, RatePeriod>> for RateTable {
    type Error = IBondError;

    fn try_from(entries: BTreeMap<NaiveDate, RatePeriod>) -> IBondResult<Self> {
        Self::new(entries)
    }
}

impl From<RateTable> for BTreeMap<NaiveDate, RatePeriod> {
    fn from(table: RateTable) -> Self {
        table.entries
    }
}

/// Checks whether `date` lies on the canonical rate-change calendar.
fn is_rate_change_date(date: NaiveDate) -> bool {
    if date == program_start() {
        return true;
    }
    date > program_start() && date.day() == 1 && matches!(date.month(), 5 | 11)
}
