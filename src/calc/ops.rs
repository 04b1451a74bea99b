//! Arithmetic and transcendental operations.
//!
//! Each operation reads X (and Y for the two-operand keys), computes in
//! full `f64` precision and classifies the result as an [`Outcome`].
//! [`apply`] then writes the outcome back into X. Binary operators do not
//! drop the stack afterwards: Y keeps its stale value until the next ENTER,
//! as on the original hardware.

use crate::calc::RegisterStack;
use crate::decimal::{self, trig, OVERFLOW_SENTINEL};
use serde::{Serialize, Deserialize};
use std::fmt;
use tracing::{debug, warn};

/// Result of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// A normal result. Rounded to 9 significant digits when stored.
    Value(f64),
    /// A singular tangent. The sentinel is a real number and is displayed
    /// like any other value.
    OverflowSentinel(f64),
    /// An undefined or out-of-range result. X is zeroed and the display
    /// winks `0.0`.
    DomainError,
}

impl Outcome {
    /// Whether the display should flash instead of showing X.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Outcome::DomainError)
    }

    /// The numeric value carried by the outcome, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Value(v) | Outcome::OverflowSentinel(v) => Some(*v),
            Outcome::DomainError => None,
        }
    }
}

/// Operations that consume the stack and produce a new X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    // ==================== Two operands ====================

    /// X ← X + Y
    Add,
    /// X ← Y − X
    Subtract,
    /// X ← Y × X
    Multiply,
    /// X ← Y ÷ X
    Divide,
    /// X ← Y^X
    Power,

    // ==================== One operand ====================

    /// X ← 1/X
    Reciprocal,
    /// X ← √X
    SquareRoot,
    /// X ← log₁₀ X
    Log10,
    /// X ← ln X
    Ln,
    /// X ← e^X
    Exp,
    /// X ← sin X (degrees)
    Sin,
    /// X ← cos X (degrees)
    Cos,
    /// X ← tan X (degrees)
    Tan,
    /// X ← arcsin X, in degrees
    ArcSin,
    /// X ← arccos X, in degrees
    ArcCos,
    /// X ← arctan X, in degrees
    ArcTan,
    /// X ← −X
    ChangeSign,
}

impl Operation {
    /// Key label printed on the calculator.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
            Operation::Power => "xʸ",
            Operation::Reciprocal => "1/x",
            Operation::SquareRoot => "√x",
            Operation::Log10 => "log",
            Operation::Ln => "ln",
            Operation::Exp => "eˣ",
            Operation::Sin => "sin",
            Operation::Cos => "cos",
            Operation::Tan => "tan",
            Operation::ArcSin => "arc sin",
            Operation::ArcCos => "arc cos",
            Operation::ArcTan => "arc tan",
            Operation::ChangeSign => "CHS",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a result that may exceed the device range.
///
/// The range test runs on the 9-digit value that would be stored.
fn bounded(value: f64) -> Outcome {
    let rounded = decimal::round_sig(value);
    if decimal::is_representable(rounded) {
        Outcome::Value(rounded)
    } else {
        Outcome::DomainError
    }
}

/// Classify a result that is only defined when `defined` holds.
fn guarded(defined: bool, value: impl FnOnce() -> f64) -> Outcome {
    if defined {
        Outcome::Value(value())
    } else {
        Outcome::DomainError
    }
}

/// Compute `op` against the current stack without modifying it.
pub fn evaluate(op: Operation, stack: &RegisterStack) -> Outcome {
    let x = stack.x();
    let y = stack.y();

    match op {
        Operation::Add => Outcome::Value(x + y),
        Operation::Subtract => Outcome::Value(y - x),
        Operation::Multiply => bounded(y * x),
        Operation::Divide => guarded(x != 0.0, || y / x),
        Operation::Power => {
            if y <= 0.0 {
                Outcome::DomainError
            } else {
                bounded(y.powf(x))
            }
        }

        Operation::Reciprocal => guarded(x != 0.0, || 1.0 / x),
        Operation::SquareRoot => guarded(x >= 0.0, || x.sqrt()),
        Operation::Log10 => guarded(x > 0.0, || x.log10()),
        Operation::Ln => guarded(x > 0.0, || x.ln()),
        Operation::Exp => bounded(x.exp()),

        Operation::Sin => Outcome::Value(trig::sin_deg(x)),
        Operation::Cos => Outcome::Value(trig::cos_deg(x)),
        Operation::Tan => match trig::tan_deg(x) {
            Some(tangent) => Outcome::Value(tangent),
            None => Outcome::OverflowSentinel(trig::tan_singularity_sign(x) * OVERFLOW_SENTINEL),
        },
        Operation::ArcSin => guarded((-1.0..=1.0).contains(&x), || x.asin().to_degrees()),
        Operation::ArcCos => guarded((-1.0..=1.0).contains(&x), || x.acos().to_degrees()),
        Operation::ArcTan => Outcome::Value(x.atan().to_degrees()),

        Operation::ChangeSign => Outcome::Value(-x),
    }
}

/// Execute `op`: evaluate it and write the outcome into X.
///
/// A domain error leaves X at 0.0. The other registers are never touched.
pub fn apply(op: Operation, stack: &mut RegisterStack) -> Outcome {
    let outcome = evaluate(op, stack);

    match outcome {
        Outcome::Value(v) | Outcome::OverflowSentinel(v) => stack.set_x(v),
        Outcome::DomainError => {
            warn!(op = %op, x = stack.x(), y = stack.y(), "domain error");
            stack.set_x(0.0);
        }
    }

    debug!(op = %op, ?outcome, x = stack.x(), "operation applied");
    outcome
}
