//! Full-screen front panel for the HP-35 emulator.
//!
//! Provides an interactive terminal panel with:
//! - The LED display in the configured color, blinking on a domain error
//! - The power switch and keyboard legend
//! - A live view of X, Y, Z, T and M
//! - Token entry, with single-key exponent entry after E EX

mod app;
mod ui;

pub use app::{PanelApp, run_panel};
