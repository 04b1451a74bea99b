//! Calculator core for the HP-35.
//!
//! This module implements the operator-visible machine:
//! - a four-level stack X, Y, Z, T plus one memory register M
//! - the arithmetic and transcendental key set, in degrees
//! - the command vocabulary and the owned [`Calculator`] that dispatches it

pub mod registers;
pub mod ops;
pub mod command;
pub mod calculator;

pub use registers::{Register, RegisterStack, STACK_DEPTH};
pub use ops::{Operation, Outcome};
pub use command::{Command, CommandError, VOCABULARY};
pub use calculator::{Calculator, PowerState, Response};
