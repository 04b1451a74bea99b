//! Command vocabulary of the HP-35 keyboard.
//!
//! Each key is typed as a short case-sensitive token. Numeric literals are
//! accepted anywhere a key is, and `pi` enters π to the ten digits printed
//! on the key.

use crate::calc::Operation;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// π as entered by the `pi` key.
pub const PI_ENTRY: f64 = 3.141592654;

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    // ==================== Power ====================

    /// Switch the calculator off and end the session.
    Off,
    /// Switch the calculator on.
    On,

    // ==================== Stack and memory ====================

    /// CLR: zero X, Y, Z, T and M.
    Clear,
    /// CL x: zero X only.
    ClearX,
    /// ENTER↑: push X into Y.
    Enter,
    /// R↓: rotate the stack down.
    RollDown,
    /// x⇆y: exchange X and Y.
    ExchangeXY,
    /// STO: copy X to M.
    Store,
    /// RCL: copy M to X.
    Recall,

    // ==================== Entry ====================

    /// E EX: key an exponent for the value in X.
    EnterExponent,
    /// A numeric literal. Overwrites X without pushing.
    Number(f64),

    // ==================== Arithmetic ====================

    /// Any key that runs through the operation engine.
    Op(Operation),
}

/// Every legal non-numeric token and the command it maps to.
pub const VOCABULARY: &[(&str, Command)] = &[
    ("off", Command::Off),
    ("on", Command::On),
    ("xy", Command::Op(Operation::Power)),
    ("log", Command::Op(Operation::Log10)),
    ("ln", Command::Op(Operation::Ln)),
    ("ex", Command::Op(Operation::Exp)),
    ("clr", Command::Clear),
    ("rx", Command::Op(Operation::SquareRoot)),
    ("as", Command::Op(Operation::ArcSin)),
    ("ac", Command::Op(Operation::ArcCos)),
    ("at", Command::Op(Operation::ArcTan)),
    ("sin", Command::Op(Operation::Sin)),
    ("cos", Command::Op(Operation::Cos)),
    ("tan", Command::Op(Operation::Tan)),
    ("1x", Command::Op(Operation::Reciprocal)),
    ("rv", Command::ExchangeXY),
    ("rd", Command::RollDown),
    ("sto", Command::Store),
    ("rcl", Command::Recall),
    ("e", Command::Enter),
    ("chs", Command::Op(Operation::ChangeSign)),
    ("eex", Command::EnterExponent),
    ("clx", Command::ClearX),
    ("+", Command::Op(Operation::Add)),
    ("-", Command::Op(Operation::Subtract)),
    ("x", Command::Op(Operation::Multiply)),
    ("/", Command::Op(Operation::Divide)),
    ("pi", Command::Number(PI_ENTRY)),
];

impl Command {
    /// Decode a token typed at the prompt.
    ///
    /// Surrounding whitespace is ignored. Key tokens are matched exactly;
    /// anything else must be a finite decimal literal.
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CommandError::Empty);
        }

        if let Some((_, command)) = VOCABULARY.iter().find(|(key, _)| *key == token) {
            return Ok(*command);
        }

        let value: f64 = token
            .parse()
            .map_err(|_| CommandError::Unknown(token.to_string()))?;
        if !value.is_finite() {
            return Err(CommandError::NotFinite(token.to_string()));
        }
        Ok(Command::Number(value))
    }

    /// The token that produces this command, for key commands.
    pub fn token(&self) -> Option<&'static str> {
        if let Command::Number(_) = self {
            return None;
        }
        VOCABULARY
            .iter()
            .find(|(_, command)| command == self)
            .map(|(key, _)| *key)
    }
}

/// Errors from decoding a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown key: {0}")]
    Unknown(String),

    #[error("number out of range: {0}")]
    NotFinite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_parses() {
        for (token, command) in VOCABULARY {
            assert_eq!(Command::parse(token), Ok(*command), "token {token}");
        }
    }

    #[test]
    fn test_token_roundtrip() {
        for (token, command) in VOCABULARY {
            if let Command::Number(_) = command {
                continue;
            }
            assert_eq!(command.token(), Some(*token));
        }
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(Command::parse("42"), Ok(Command::Number(42.0)));
        assert_eq!(Command::parse("42."), Ok(Command::Number(42.0)));
        assert_eq!(Command::parse("-0.5"), Ok(Command::Number(-0.5)));
        assert_eq!(Command::parse("1e25"), Ok(Command::Number(1e25)));
        assert_eq!(Command::parse(" 7 "), Ok(Command::Number(7.0)));
    }

    #[test]
    fn test_pi_key() {
        assert_eq!(Command::parse("pi"), Ok(Command::Number(3.141592654)));
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert_eq!(Command::parse("SIN"), Err(CommandError::Unknown("SIN".into())));
        assert_eq!(Command::parse("E"), Err(CommandError::Unknown("E".into())));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(Command::parse("."), Err(CommandError::Unknown(".".into())));
        assert_eq!(Command::parse("foo"), Err(CommandError::Unknown("foo".into())));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(Command::parse("inf"), Err(CommandError::NotFinite("inf".into())));
        assert_eq!(Command::parse("NaN"), Err(CommandError::NotFinite("NaN".into())));
        assert_eq!(Command::parse("1e400"), Err(CommandError::NotFinite("1e400".into())));
    }
}
