//! LED display encoding.
//!
//! The HP-35 shows every value on fifteen LED positions:
//!
//! ```text
//!  position  0   1 ..... 11   12   13 14
//!            s   d.ddddddddd  e    x  x
//! ```
//!
//! - Position 0 is blank or `-` for the mantissa sign.
//! - Positions 1-11 hold the mantissa. Trailing zeros are blanked.
//! - Position 12 is blank for a positive exponent and `-` for a negative one.
//! - Positions 13-14 are the two exponent digits.
//!
//! There is no `E` anywhere. Values from 0.01 up to (but excluding) one
//! billion skip the exponent field entirely and are printed as plain
//! decimals, left-justified, with the decimal point always shown.

use crate::decimal::{round_sig, DISPLAY_MAX, SIGNIFICANT_DIGITS};
use serde::{Serialize, Deserialize};
use std::fmt;

/// Number of LED positions.
pub const DISPLAY_WIDTH: usize = 15;

/// Smallest magnitude printed without an exponent.
pub const PLAIN_LOWER_BOUND: f64 = 0.01;

/// Magnitudes from here up are printed with an exponent.
pub const PLAIN_UPPER_BOUND: f64 = 1e9;

/// Smallest exponent the two-digit field can show.
const MIN_EXPONENT: i32 = -99;

/// Digits after the point in a scientific mantissa (`d.ddddddddd`).
const MANTISSA_DECIMALS: usize = 9;

/// Index of the last mantissa position.
const LAST_MANTISSA_POS: usize = 11;

/// Display for zero.
pub const ZERO_TEXT: &str = "0.             ";

/// Display flashed on a domain error.
pub const WINK_TEXT: &str = "0.0            ";

/// Display of a switched-off calculator.
pub const BLANK_TEXT: &str = "               ";

/// Clamped display for values above the device range.
pub const POSITIVE_EDGE_TEXT: &str = " 9.999999999 99";

/// Clamped display for values below the negative device range.
pub const NEGATIVE_EDGE_TEXT: &str = "-9.999999999 99";

/// How a value was laid out on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notation {
    /// Plain decimal in `[0.01, 1e9)`.
    Normal,
    /// Mantissa and two-digit exponent.
    Scientific,
    /// Exactly zero.
    Zero,
    /// Beyond ±9.99999999e99; clamped to the display edge.
    Overflow,
    /// Nonzero but below 1e-99; shown as zero.
    Underflow,
    /// No numeric result; the display winks `0.0`.
    DomainError,
}

/// A rendered 15-position display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedDisplay {
    text: String,
    positive: bool,
    notation: Notation,
}

impl LedDisplay {
    fn new(text: String, positive: bool, notation: Notation) -> Self {
        debug_assert_eq!(text.chars().count(), DISPLAY_WIDTH, "display text {text:?}");
        Self { text, positive, notation }
    }

    /// The zero display.
    pub fn zero() -> Self {
        Self::new(ZERO_TEXT.to_string(), true, Notation::Zero)
    }

    /// The domain-error wink.
    pub fn wink() -> Self {
        Self::new(WINK_TEXT.to_string(), true, Notation::DomainError)
    }

    /// The dark display of a switched-off calculator.
    pub fn blank() -> Self {
        Self::new(BLANK_TEXT.to_string(), true, Notation::Zero)
    }

    /// Rebuild a display from raw text, padding or truncating to
    /// [`DISPLAY_WIDTH`] positions.
    pub(crate) fn from_raw(text: &str, positive: bool, notation: Notation) -> Self {
        Self::new(fit_width(text), positive, notation)
    }

    /// The fifteen display characters.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    /// Whether the exponent field is in use.
    pub fn is_scientific(&self) -> bool {
        matches!(self.notation, Notation::Scientific | Notation::Overflow)
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    /// Whether this is the domain-error wink.
    pub fn is_flash(&self) -> bool {
        self.notation == Notation::DomainError
    }

    /// Characters separated by single blanks, the way the LED segments
    /// sit apart on the real display.
    pub fn spaced(&self) -> String {
        let mut out = String::with_capacity(DISPLAY_WIDTH * 2);
        for (i, c) in self.text.chars().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for LedDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Pad with blanks or cut to exactly [`DISPLAY_WIDTH`] characters.
fn fit_width(text: &str) -> String {
    let mut out: String = text.chars().take(DISPLAY_WIDTH).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(DISPLAY_WIDTH - len));
    out
}

/// Split a magnitude into its mantissa text and decimal exponent,
/// e.g. `(1.500000000, 25)` for 1.5e25 with nine decimals.
fn split_scientific(magnitude: f64, decimals: usize) -> (String, i32) {
    let rendered = format!("{magnitude:.decimals$e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or_default()),
        None => (rendered, 0),
    }
}

/// Render a magnitude inside `[0.01, 1e9)` as a plain decimal with
/// trailing zeros dropped and the point kept, e.g. `100.` or `0.0125`.
fn plain_digits(magnitude: f64) -> String {
    let (mantissa, exponent) = split_scientific(magnitude, SIGNIFICANT_DIGITS - 1);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let mut text = if exponent >= 0 {
        let split = (exponent as usize + 1).min(digits.len());
        format!("{}.{}", &digits[..split], &digits[split..])
    } else {
        let leading_zeros = exponent.unsigned_abs() as usize - 1;
        format!("0.{}{}", "0".repeat(leading_zeros), digits)
    };

    while text.ends_with('0') {
        text.pop();
    }
    text
}

/// Lay out a magnitude in the mantissa/exponent form.
///
/// Returns `None` when the exponent is below -99.
fn scientific_cells(magnitude: f64, positive: bool) -> Option<String> {
    let (mantissa, exponent) = split_scientific(magnitude, MANTISSA_DECIMALS);
    if exponent < MIN_EXPONENT {
        return None;
    }

    let mut cells: Vec<char> = Vec::with_capacity(DISPLAY_WIDTH);
    cells.push(if positive { ' ' } else { '-' });
    cells.extend(mantissa.chars());

    // Blank trailing zeros, stopping at the first other character.
    let mut pos = LAST_MANTISSA_POS;
    while cells.get(pos) == Some(&'0') {
        cells[pos] = ' ';
        pos -= 1;
    }

    cells.push(if exponent < 0 { '-' } else { ' ' });
    cells.extend(format!("{:02}", exponent.unsigned_abs()).chars());
    Some(cells.into_iter().collect())
}

/// Convert a value into its fifteen-position LED display.
///
/// The value is rounded to 9 significant digits first. Magnitudes in
/// `[0.01, 1e9)` are printed as plain decimals; everything else uses the
/// exponent field. Values beyond ±9.99999999e99 clamp to the display edge.
pub fn format(value: f64) -> LedDisplay {
    if value.is_nan() {
        return LedDisplay::wink();
    }
    if value == 0.0 {
        return LedDisplay::zero();
    }
    if value > DISPLAY_MAX {
        return LedDisplay::new(POSITIVE_EDGE_TEXT.to_string(), true, Notation::Overflow);
    }
    if value < -DISPLAY_MAX {
        return LedDisplay::new(NEGATIVE_EDGE_TEXT.to_string(), false, Notation::Overflow);
    }

    let positive = value > 0.0;
    let magnitude = round_sig(value.abs());

    if (PLAIN_LOWER_BOUND..PLAIN_UPPER_BOUND).contains(&magnitude) {
        let sign = if positive { "" } else { "-" };
        let text = format!("{sign}{}", plain_digits(magnitude));
        return LedDisplay::new(fit_width(&text), positive, Notation::Normal);
    }

    match scientific_cells(magnitude, positive) {
        Some(text) => LedDisplay::new(text, positive, Notation::Scientific),
        None => LedDisplay::new(ZERO_TEXT.to_string(), positive, Notation::Underflow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: f64) -> String {
        format(value).text().to_string()
    }

    #[test]
    fn test_zero() {
        let display = format(0.0);
        assert_eq!(display.text(), "0.             ");
        assert!(!display.is_scientific());
        assert_eq!(display.notation(), Notation::Zero);
        assert_eq!(format(-0.0), display);
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(text(3.5), "3.5            ");
        assert_eq!(text(100.0), "100.           ");
        assert_eq!(text(-42.25), "-42.25         ");
        assert_eq!(text(0.0125), "0.0125         ");
        assert_eq!(text(123456789.0), "123456789.     ");
    }

    #[test]
    fn test_plain_values_are_rounded() {
        assert_eq!(text(1.0 / 3.0), "0.333333333    ");
        assert_eq!(text(2.0 / 3.0), "0.666666667    ");
        assert_eq!(text(-0.0123456789123), "-0.0123456789  ");
    }

    #[test]
    fn test_scientific_large() {
        let display = format(1.5e25);
        assert_eq!(display.text(), " 1.5         25");
        assert!(display.is_scientific());
        assert!(display.is_positive());
    }

    #[test]
    fn test_scientific_small() {
        assert_eq!(text(0.001), " 1.         -03");
        assert_eq!(text(-2.5e-7), "-2.5        -07");
    }

    #[test]
    fn test_scientific_keeps_inner_zeros() {
        assert_eq!(text(1.0045e25), " 1.0045      25");
        assert_eq!(text(1e55), " 1.          55");
        assert_eq!(text(4.562389e16), " 4.562389    16");
    }

    #[test]
    fn test_full_mantissa() {
        assert_eq!(text(1.23456789e-50), " 1.23456789 -50");
        assert_eq!(text(-9.87654321e12), "-9.87654321  12");
    }

    #[test]
    fn test_lower_boundary_is_plain() {
        let display = format(0.01);
        assert_eq!(display.text(), "0.01           ");
        assert_eq!(display.notation(), Notation::Normal);
        // Ten nines round up to 0.01; nine nines are kept as they are.
        assert!(!format(0.009999999999).is_scientific());
        assert!(format(0.00999999999).is_scientific());
    }

    #[test]
    fn test_upper_boundary_is_scientific() {
        let display = format(1e9);
        assert_eq!(display.text(), " 1.          09");
        assert!(display.is_scientific());
        assert!(!format(999999999.0).is_scientific());
        // Rounds up into the exponent range.
        assert!(format(999999999.7).is_scientific());
    }

    #[test]
    fn test_edge_clamping() {
        let display = format(1e100);
        assert_eq!(display.text(), " 9.999999999 99");
        assert_eq!(display.notation(), Notation::Overflow);
        assert!(display.is_scientific());

        let display = format(-1e100);
        assert_eq!(display.text(), "-9.999999999 99");
        assert!(!display.is_positive());

        assert_eq!(text(f64::INFINITY), " 9.999999999 99");
        assert_eq!(text(9.999999991e99), " 9.999999999 99");
    }

    #[test]
    fn test_largest_unclamped_value() {
        assert_eq!(text(9.99999999e99), " 9.99999999  99");
    }

    #[test]
    fn test_underflow_shows_zero() {
        let display = format(1e-120);
        assert_eq!(display.text(), ZERO_TEXT);
        assert_eq!(display.notation(), Notation::Underflow);
        assert_eq!(text(1e-99), " 1.         -99");
    }

    #[test]
    fn test_nan_winks() {
        assert!(format(f64::NAN).is_flash());
    }

    #[test]
    fn test_always_fifteen_positions() {
        for v in [1.0, -1.0, 0.5, 1e-5, -1e-5, 7e99, 123.456, -0.0125, 5e8, 1e-99] {
            assert_eq!(text(v).chars().count(), DISPLAY_WIDTH, "value {v}");
        }
    }

    #[test]
    fn test_spaced() {
        assert_eq!(format(3.5).spaced(), "3 . 5                        ");
    }
}
