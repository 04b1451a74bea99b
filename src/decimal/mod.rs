//! Decimal precision rules of the HP-35.
//!
//! The calculator works with 9 significant decimal digits and a two-digit
//! exponent. This module provides:
//! - [`round_sig`] - rounding a binary float to the device precision
//! - [`trig`] - degree-mode trigonometry with exact quadrant values

mod round;
pub mod trig;

pub use round::{round_sig, is_representable, SIGNIFICANT_DIGITS, DISPLAY_MAX, OVERFLOW_SENTINEL};
