//! Significant-digit rounding.
//!
//! Every value that lands in a register is first rounded to the precision
//! the LED display can show. Rounding goes through the shortest decimal
//! rendering rather than through `powi` scaling, so a value that is already
//! rounded comes back bit-for-bit unchanged.

/// Number of significant decimal digits a register holds.
pub const SIGNIFICANT_DIGITS: usize = 9;

/// Largest magnitude the display can show before clamping to its edge.
pub const DISPLAY_MAX: f64 = 9.99999999e99;

/// Value substituted for a singular tangent (90° and 270°).
pub const OVERFLOW_SENTINEL: f64 = 9.99999999e99;

/// Round `value` to [`SIGNIFICANT_DIGITS`] significant decimal digits.
///
/// Zero, infinities and NaN pass through untouched.
pub fn round_sig(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let rendered = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    rendered.parse().unwrap_or(value)
}

/// Whether a computed result fits inside the device range.
pub fn is_representable(value: f64) -> bool {
    value.is_finite() && value.abs() <= DISPLAY_MAX
}
