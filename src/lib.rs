//! # HP-35 Emulator
//!
//! An emulator of the Hewlett-Packard HP-35 (1972), the first handheld
//! scientific calculator.
//!
//! The HP-35 works in reverse Polish notation on a four-level stack with
//! one memory register. Every register holds a value rounded to 9
//! significant digits, shown on a 15-position LED display. This emulator recreates
//! its operator-visible behavior: stack motion, the transcendental key set
//! in degrees, display formatting and exponent entry.

pub mod decimal;
pub mod calc;
pub mod display;
pub mod config;
pub mod logging;
pub mod console;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use calc::{Calculator, Command, CommandError, Operation, Outcome, Register, RegisterStack, Response};
pub use display::{format, ExponentEntry, EntryError, LedDisplay, Notation};
pub use config::{Config, LedColor};

#[cfg(feature = "tui")]
pub use tui::run_panel;
