//! HP-35 register stack.
//!
//! The HP-35 had 5 storage registers:
//! - X: display register (top of the operational stack)
//! - Y, Z, T: the rest of the four-level stack
//! - M: one memory register, independent of the stack
//!
//! The stack is a fixed shift register. Values move between the four
//! slots; nothing is ever pushed off into a growing collection.

use crate::decimal::round_sig;
use serde::{Serialize, Deserialize};
use std::fmt;

/// Depth of the operational stack.
pub const STACK_DEPTH: usize = 4;

/// Names of the four stack levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    X,
    Y,
    Z,
    T,
}

impl Register {
    /// All stack registers, bottom (X) first.
    pub const ALL: [Register; STACK_DEPTH] = [Register::X, Register::Y, Register::Z, Register::T];

    const fn index(self) -> usize {
        match self {
            Register::X => 0,
            Register::Y => 1,
            Register::Z => 2,
            Register::T => 3,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register::X => "X",
            Register::Y => "Y",
            Register::Z => "Z",
            Register::T => "T",
        };
        f.write_str(name)
    }
}

/// The four-level stack plus the memory register.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegisterStack {
    /// Stack slots indexed by [`Register`], X first.
    levels: [f64; STACK_DEPTH],
    /// M: memory register.
    memory: f64,
}

impl RegisterStack {
    /// Create a stack with every register zeroed.
    pub const fn new() -> Self {
        Self {
            levels: [0.0; STACK_DEPTH],
            memory: 0.0,
        }
    }

    /// Build a stack from explicit X, Y, Z, T values (rounded on entry).
    pub fn from_levels(x: f64, y: f64, z: f64, t: f64) -> Self {
        let mut stack = Self::new();
        for (reg, value) in Register::ALL.into_iter().zip([x, y, z, t]) {
            stack.set(reg, value);
        }
        stack
    }

    /// Read a stack register.
    #[inline]
    pub fn get(&self, reg: Register) -> f64 {
        self.levels[reg.index()]
    }

    /// Write a stack register, rounding to the device precision.
    #[inline]
    pub fn set(&mut self, reg: Register, value: f64) {
        self.levels[reg.index()] = round_sig(value);
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.get(Register::X)
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.get(Register::Y)
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.get(Register::Z)
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.get(Register::T)
    }

    /// M register.
    #[inline]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Overwrite X, rounding to the device precision.
    #[inline]
    pub fn set_x(&mut self, value: f64) {
        self.set(Register::X, value);
    }

    /// ENTER: T←Z, Z←Y, Y←X. X keeps its value.
    pub fn push(&mut self) -> &mut Self {
        self.levels.copy_within(0..STACK_DEPTH - 1, 1);
        self
    }

    /// R↓: X←Y, Y←Z, Z←T, T←X.
    pub fn rotate_down(&mut self) -> &mut Self {
        self.levels.rotate_left(1);
        self
    }

    /// x⇆y: swap X and Y.
    pub fn exchange_xy(&mut self) -> &mut Self {
        self.levels.swap(Register::X.index(), Register::Y.index());
        self
    }

    /// Zero the four stack registers. M is untouched.
    pub fn clear(&mut self) -> &mut Self {
        self.levels = [0.0; STACK_DEPTH];
        self
    }

    /// STO: M←X.
    pub fn memory_store(&mut self) -> &mut Self {
        self.memory = self.x();
        self
    }

    /// RCL: X←M.
    pub fn memory_recall(&mut self) -> &mut Self {
        self.levels[Register::X.index()] = self.memory;
        self
    }

    /// Zero M.
    pub fn memory_clear(&mut self) -> &mut Self {
        self.memory = 0.0;
        self
    }
}

impl fmt::Debug for RegisterStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterStack")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("t", &self.t())
            .field("m", &self.memory)
            .finish()
    }
}

impl fmt::Display for RegisterStack {
    /// Register dump in the calculator's verbose layout.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "M : {}", self.memory)?;
        writeln!(f)?;
        for reg in Register::ALL {
            writeln!(f, "{} : {}", reg, self.get(reg))?;
        }
        Ok(())
    }
}
