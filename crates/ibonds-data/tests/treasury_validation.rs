//! Integration tests validated against published TreasuryDirect values.
//!
//! Redemption values and rates here were cross-checked against the
//! TreasuryDirect savings bond calculator for the corresponding issue dates,
//! so they exercise the full historical table and the exact published
//! rounding rules end to end.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use ibonds_core::IBond;
use ibonds_data::historical_rates;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn rates_as_of_april_2023() {
    let table = historical_rates();
    let d = date(2023, 4, 7);
    assert_eq!(table.fixed_rate(d).unwrap(), Some(dec!(0.40)));
    assert_eq!(table.inflation_rate(d).unwrap(), Some(dec!(3.24)));
    assert_eq!(table.composite_rate(dec!(0.40), d).unwrap(), Some(dec!(6.89)));
}

#[test]
fn fixed_rate_at_issue() {
    let bond = IBond::new(4, 2023, dec!(25), historical_rates().clone()).unwrap();
    assert_eq!(bond.fixed_rate().unwrap(), dec!(0.40));
    assert_eq!(bond.composite_rate(date(2023, 4, 7)).unwrap(), Some(dec!(6.89)));
}

#[test]
fn value_of_recent_bond_with_penalty() {
    let bond = IBond::new(1, 2022, dec!(1000), historical_rates().clone()).unwrap();
    assert_eq!(bond.value(date(2022, 1, 1)).unwrap(), dec!(1000));
    assert_eq!(bond.value(date(2022, 2, 2)).unwrap(), dec!(1000));
    assert_eq!(bond.value(date(2023, 4, 1)).unwrap(), dec!(1085.60));
}

#[test]
fn value_of_bond_past_penalty_window() {
    let bond = IBond::new(4, 2018, dec!(1000), historical_rates().clone()).unwrap();
    assert_eq!(bond.value(date(2023, 4, 1)).unwrap(), dec!(1184.80));
    assert_eq!(bond.value(date(2023, 10, 1)).unwrap(), dec!(1223.60));
}

#[test]
fn value_of_earliest_possible_bond() {
    // Issued the month the program started; 25 full years of accrual.
    let bond = IBond::new(9, 1998, dec!(10000), historical_rates().clone()).unwrap();
    assert_eq!(bond.value(date(2023, 9, 1)).unwrap(), dec!(43240));
}
