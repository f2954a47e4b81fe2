//! Historical I Bond interest rate data.
//!
//! The Treasury publishes a (fixed rate, inflation rate) pair every May 1 and
//! November 1, plus an exceptional first announcement on September 1, 1998,
//! when the program started. This module holds that history as an immutable
//! lookup table.

mod table;

pub use table::{program_start, RatePeriod, RateTable};
