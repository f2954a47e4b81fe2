//! Calculation primitives for I Bond valuation.

mod year_month;

pub use year_month::YearMonth;
