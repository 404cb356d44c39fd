//! Price calculation
//!
//! All money math happens in `Decimal` and is rounded half-away-from-zero
//! to two decimal places before leaving this module. Stored prices are f64
//! and converted at the boundary.

mod calculator;

pub use calculator::{discounted_unit_price, line_total, order_total, to_decimal, to_f64};
