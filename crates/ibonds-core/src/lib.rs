//! # ibonds Core
//!
//! Valuation core for U.S. Series I Savings Bonds (I Bonds).
//!
//! This crate answers two questions about an I Bond, to the exact published
//! Treasury rules:
//!
//! - **What is its composite rate on a given date?** The composite rate
//!   combines the bond's fixed rate with the inflation rate in effect for the
//!   bond's own six-month rate epoch, which is aligned to the issue month
//!   rather than to the calendar rate-change dates.
//! - **What is it worth on a given date?** Redemption values compound
//!   semiannually with every step rounded to the cent, apply the three-month
//!   early-redemption penalty under five years, and stop accruing at
//!   30 years.
//!
//! The core performs no file or network I/O. Callers construct a
//! [`RateTable`] from externally supplied data (see the `ibonds-data` crate
//! for the published historical table) and bind an [`IBond`] to it.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use ibonds_core::{IBond, RatePeriod, RateTable};
//!
//! let table = RateTable::from_entries([
//!     (
//!         NaiveDate::from_ymd_opt(2022, 11, 1).unwrap(),
//!         RatePeriod::new(dec!(0.40), dec!(3.24)),
//!     ),
//! ])?;
//!
//! let bond = IBond::new(12, 2022, dec!(1000), Arc::new(table))?;
//! assert_eq!(bond.fixed_rate()?, dec!(0.40));
//! # Ok::<(), ibonds_core::IBondError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::manual_range_contains)]

pub mod bond;
pub mod error;
pub mod rates;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::IBond;
    pub use crate::error::{IBondError, IBondResult};
    pub use crate::rates::{RatePeriod, RateTable};
    pub use crate::types::YearMonth;
}

// Re-export commonly used types at crate root
pub use bond::IBond;
pub use error::{IBondError, IBondResult};
pub use rates::{RatePeriod, RateTable};
pub use types::YearMonth;
