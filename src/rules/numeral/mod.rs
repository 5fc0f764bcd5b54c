//! Numeral helpers for lane counts and lane numbers.

pub mod helpers;

pub use helpers::{is_numeric, numeral_value, ordinal_value, parse_decimal};
