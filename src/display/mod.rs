//! Display side of the calculator.
//!
//! This module turns register contents into what the operator sees:
//! - [`format`] - the fifteen-position LED encoding of a value
//! - [`exponent`] - the E EX exponent-entry sub-mode
//! - [`panel`] - the text drawing of the front panel and key legend

pub mod format;
pub mod exponent;
pub mod panel;

pub use format::{format, LedDisplay, Notation, DISPLAY_WIDTH};
pub use exponent::{ExponentEntry, EntryKey, EntryState, EntryError};

use crate::calc::RegisterStack;

/// Render the X register for an external display sink.
pub fn render(stack: &RegisterStack) -> LedDisplay {
    format(stack.x())
}
