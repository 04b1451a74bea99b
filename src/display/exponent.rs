//! E EX: keying an exponent for the value in X.
//!
//! Pressing E EX freezes the current mantissa on the display and opens the
//! two exponent positions for editing:
//!
//! ```text
//!  1.5          00     seeded from X = 1.5
//!  1.5          02     after `2`
//!  1.5          25     after `5`
//!  1.5         -25     after `-`
//! ```
//!
//! Digits shift through the two positions like a shift register, `-`
//! toggles the exponent sign, and Enter commits `mantissa × 10^exponent`.
//! The machine is consumed by the commit and keeps nothing between uses.

use crate::decimal::round_sig;
use crate::display::format::{format, LedDisplay, Notation, DISPLAY_WIDTH};
use thiserror::Error;
use tracing::trace;

/// End of the mantissa region (exclusive).
const MANTISSA_END: usize = 12;
/// Exponent sign position.
const EXP_SIGN_POS: usize = 12;
/// First exponent digit.
const EXP_HIGH_POS: usize = 13;
/// Second exponent digit.
const EXP_LOW_POS: usize = 14;

/// A key accepted during exponent entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey {
    /// An exponent digit `0`-`9`.
    Digit(char),
    /// Flip the exponent sign.
    ToggleSign,
    /// Finish entry.
    Confirm,
}

impl EntryKey {
    /// Map a raw keystroke.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(EntryKey::Digit(c)),
            '-' => Some(EntryKey::ToggleSign),
            '\n' | '\r' => Some(EntryKey::Confirm),
            _ => None,
        }
    }
}

/// Where the machine stands after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Still accepting exponent keys.
    Editing,
    /// Confirm was pressed; call [`ExponentEntry::commit`].
    Confirmed,
}

/// The exponent-entry state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExponentEntry {
    cells: [char; DISPLAY_WIDTH],
    /// Seeded mantissa in full. A plain value such as `-0.0123456789`
    /// needs more than the twelve mantissa positions shown.
    mantissa: String,
}

impl ExponentEntry {
    /// Seed the display from the X register.
    ///
    /// X is rounded to 9 digits; an X of exactly zero seeds `1.` so there is
    /// a mantissa to scale. The exponent digits start at `00`.
    pub fn seed(x: f64) -> Self {
        let mut value = round_sig(x);
        if value == 0.0 {
            value = 1.0;
        }
        let seeded = format(value);

        let mut cells = [' '; DISPLAY_WIDTH];
        for (slot, c) in cells.iter_mut().zip(seeded.text().chars()).take(MANTISSA_END) {
            *slot = c;
        }
        // A scientific display already carries an exponent sign; keep it.
        let mantissa_len = if seeded.is_scientific() {
            cells[EXP_SIGN_POS] = seeded.text().chars().nth(EXP_SIGN_POS).unwrap_or(' ');
            MANTISSA_END
        } else {
            DISPLAY_WIDTH
        };
        cells[EXP_HIGH_POS] = '0';
        cells[EXP_LOW_POS] = '0';

        let mut mantissa: String = seeded
            .text()
            .chars()
            .take(mantissa_len)
            .filter(|c| *c != ' ')
            .collect();
        if mantissa.ends_with('.') {
            mantissa.push('0');
        }

        trace!(x, seed = %seeded, %mantissa, "exponent entry seeded");
        Self { cells, mantissa }
    }

    /// The partially edited display.
    pub fn display(&self) -> LedDisplay {
        let text: String = self.cells.iter().collect();
        LedDisplay::from_raw(&text, self.cells[0] != '-', Notation::Scientific)
    }

    /// Apply one key.
    pub fn press(&mut self, key: EntryKey) -> EntryState {
        match key {
            EntryKey::Digit(d) => {
                self.cells[EXP_HIGH_POS] = self.cells[EXP_LOW_POS];
                self.cells[EXP_LOW_POS] = d;
            }
            EntryKey::ToggleSign => {
                self.cells[EXP_SIGN_POS] = if self.cells[EXP_SIGN_POS] == '-' { ' ' } else { '-' };
            }
            EntryKey::Confirm => return EntryState::Confirmed,
        }
        trace!(?key, display = %self.display(), "exponent key");
        EntryState::Editing
    }

    /// Apply one raw keystroke, rejecting keys the machine does not know.
    pub fn press_char(&mut self, c: char) -> Result<EntryState, EntryError> {
        let key = EntryKey::from_char(c).ok_or(EntryError::InvalidKey(c))?;
        Ok(self.press(key))
    }

    /// The signed exponent currently shown.
    pub fn exponent(&self) -> i32 {
        let digit = |c: char| c.to_digit(10).unwrap_or(0) as i32;
        let magnitude = digit(self.cells[EXP_HIGH_POS]) * 10 + digit(self.cells[EXP_LOW_POS]);
        if self.cells[EXP_SIGN_POS] == '-' {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Finish entry and produce `mantissa × 10^exponent`.
    pub fn commit(self) -> Result<f64, EntryError> {
        let literal = format!("{}e{}", self.mantissa, self.exponent());
        let value: f64 = literal
            .parse()
            .map_err(|_| EntryError::Malformed(literal.clone()))?;
        trace!(%literal, value, "exponent entry committed");
        Ok(value)
    }

    /// Run the machine over a stream of keystrokes.
    ///
    /// `render` is called with the seeded display and again after every
    /// accepted key. Unknown keys are skipped. Returns the committed value
    /// once Enter arrives, or [`EntryError::Interrupted`] if the keys run
    /// out first.
    pub fn drive<I, F>(mut self, keys: I, mut render: F) -> Result<f64, EntryError>
    where
        I: IntoIterator<Item = char>,
        F: FnMut(&LedDisplay),
    {
        render(&self.display());
        for c in keys {
            let Some(key) = EntryKey::from_char(c) else {
                trace!(key = ?c, "ignored during exponent entry");
                continue;
            };
            match self.press(key) {
                EntryState::Confirmed => return self.commit(),
                EntryState::Editing => render(&self.display()),
            }
        }
        Err(EntryError::Interrupted)
    }
}

/// Errors from exponent entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("key {0:?} is not valid during exponent entry")]
    InvalidKey(char),

    #[error("cannot read {0:?} as a number")]
    Malformed(String),

    #[error("exponent entry interrupted")]
    Interrupted,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(x: f64, keys: &str) -> ExponentEntry {
        let mut entry = ExponentEntry::seed(x);
        for c in keys.chars() {
            entry.press_char(c).expect("valid key");
        }
        entry
    }

    #[test]
    fn test_seed_plain_value() {
        let entry = ExponentEntry::seed(1.5);
        assert_eq!(entry.display().text(), "1.5          00");
        assert_eq!(entry.exponent(), 0);
    }

    #[test]
    fn test_seed_zero_uses_one() {
        let entry = ExponentEntry::seed(0.0);
        assert_eq!(entry.display().text(), "1.           00");
        assert_eq!(entry.commit(), Ok(1.0));
    }

    #[test]
    fn test_seed_scientific_keeps_mantissa_and_sign() {
        let entry = ExponentEntry::seed(-2.5e-7);
        assert_eq!(entry.display().text(), "-2.5        -00");
        assert!(!entry.display().is_positive());
    }

    #[test]
    fn test_digits_shift_through_exponent() {
        let entry = keyed(1.5, "2");
        assert_eq!(entry.display().text(), "1.5          02");
        let entry = keyed(1.5, "25");
        assert_eq!(entry.display().text(), "1.5          25");
        let entry = keyed(1.5, "257");
        assert_eq!(entry.exponent(), 57);
    }

    #[test]
    fn test_sign_toggle_does_not_consume_digit() {
        let entry = keyed(1.5, "2-5");
        assert_eq!(entry.display().text(), "1.5         -25");
        assert_eq!(entry.exponent(), -25);
        let entry = keyed(1.5, "2-5-");
        assert_eq!(entry.exponent(), 25);
    }

    #[test]
    fn test_commit() {
        assert_eq!(keyed(1.5, "25").commit(), Ok(1.5e25));
        assert_eq!(keyed(1.5, "-25").commit(), Ok(1.5e-25));
        assert_eq!(keyed(-3.0, "4").commit(), Ok(-3e4));
        assert_eq!(keyed(123.25, "").commit(), Ok(123.25));
    }

    #[test]
    fn test_long_plain_mantissa_keeps_every_digit() {
        let entry = ExponentEntry::seed(-0.0123456789);
        assert_eq!(entry.display().text(), "-0.012345678 00");
        assert_eq!(entry.commit(), Ok(-0.0123456789));
        assert_eq!(keyed(-0.0123456789, "2").commit(), Ok(-1.23456789));
    }

    #[test]
    fn test_invalid_key() {
        let mut entry = ExponentEntry::seed(1.0);
        assert_eq!(entry.press_char('x'), Err(EntryError::InvalidKey('x')));
        assert_eq!(entry.press_char('\n'), Ok(EntryState::Confirmed));
    }

    #[test]
    fn test_drive_renders_every_key() {
        let mut frames = Vec::new();
        let value = ExponentEntry::seed(1.5)
            .drive("2?5\n".chars(), |d| frames.push(d.text().to_string()))
            .expect("confirmed");
        assert_eq!(value, 1.5e25);
        assert_eq!(
            frames,
            vec!["1.5          00", "1.5          02", "1.5          25"]
        );
    }

    #[test]
    fn test_drive_without_confirm_is_interrupted() {
        let result = ExponentEntry::seed(1.5).drive("25".chars(), |_| {});
        assert_eq!(result, Err(EntryError::Interrupted));
    }
}
