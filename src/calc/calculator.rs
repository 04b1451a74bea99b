//! The calculator context.
//!
//! [`Calculator`] owns all machine state: the register stack, the power
//! switch and the pending wink. Commands arrive already decoded (or as raw
//! tokens through [`Calculator::dispatch`]) and every call returns what the
//! display should show next.

use crate::calc::{ops, Command, Operation, Outcome, RegisterStack};
use crate::display::{self, EntryError, ExponentEntry, LedDisplay};
use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

/// Position of the power switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    On,
    Off,
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Show this display. A domain error arrives as the wink display.
    Display(LedDisplay),
    /// `on` was pressed while already on. Nothing changed.
    AlreadyOn(LedDisplay),
    /// The calculator was switched off; show the blank display and end the
    /// session.
    PoweredOff,
    /// E EX was pressed. Feed keys to the machine, then hand it back to
    /// [`Calculator::commit_exponent`].
    ExponentEntry(ExponentEntry),
    /// The token is not a key. State is unchanged.
    Unimplemented(String),
}

impl Response {
    /// The display to show, for responses that carry one.
    pub fn display(&self) -> Option<LedDisplay> {
        match self {
            Response::Display(d) | Response::AlreadyOn(d) => Some(d.clone()),
            Response::PoweredOff => Some(LedDisplay::blank()),
            Response::ExponentEntry(entry) => Some(entry.display()),
            Response::Unimplemented(_) => None,
        }
    }
}

/// The HP-35.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculator {
    /// X, Y, Z, T and M.
    stack: RegisterStack,
    /// Power switch.
    power: PowerState,
    /// Whether the last operation winked.
    flashing: bool,
    /// Commands executed since power-on.
    pub keystrokes: u64,
}

impl Calculator {
    /// A switched-on calculator with every register zeroed.
    pub fn new() -> Self {
        Self {
            stack: RegisterStack::new(),
            power: PowerState::On,
            flashing: false,
            keystrokes: 0,
        }
    }

    /// Zero all registers and clear any pending wink.
    pub fn reset(&mut self) {
        self.stack = RegisterStack::new();
        self.flashing = false;
        self.keystrokes = 0;
    }

    pub fn stack(&self) -> &RegisterStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut RegisterStack {
        &mut self.stack
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    pub fn is_on(&self) -> bool {
        self.power == PowerState::On
    }

    /// What the display currently shows.
    pub fn display(&self) -> LedDisplay {
        match (self.power, self.flashing) {
            (PowerState::Off, _) => LedDisplay::blank(),
            (PowerState::On, true) => LedDisplay::wink(),
            (PowerState::On, false) => display::render(&self.stack),
        }
    }

    /// Decode and execute a raw token.
    ///
    /// Tokens that are not part of the key vocabulary return
    /// [`Response::Unimplemented`] and leave every register untouched.
    pub fn dispatch(&mut self, token: &str) -> Response {
        match Command::parse(token) {
            Ok(command) => self.execute(command),
            Err(e) => {
                warn!(token, error = %e, "not implemented");
                Response::Unimplemented(token.to_string())
            }
        }
    }

    /// Execute one decoded command.
    pub fn execute(&mut self, command: Command) -> Response {
        debug!(?command, "dispatch");

        if self.power == PowerState::Off {
            return match command {
                Command::On => {
                    self.power = PowerState::On;
                    self.reset();
                    info!("powered on");
                    Response::Display(self.display())
                }
                _ => Response::PoweredOff,
            };
        }

        self.keystrokes += 1;
        self.flashing = false;

        match command {
            Command::Off => {
                self.power = PowerState::Off;
                info!(keystrokes = self.keystrokes, "powered off");
                return Response::PoweredOff;
            }
            Command::On => return Response::AlreadyOn(self.display()),
            Command::EnterExponent => {
                return Response::ExponentEntry(self.begin_exponent_entry());
            }

            Command::Clear => {
                self.stack.clear().memory_clear();
            }
            Command::ClearX => self.stack.set_x(0.0),
            Command::Enter => {
                self.stack.push();
            }
            Command::RollDown => {
                self.stack.rotate_down();
            }
            Command::ExchangeXY => {
                self.stack.exchange_xy();
            }
            Command::Store => {
                self.stack.memory_store();
            }
            Command::Recall => {
                self.stack.memory_recall();
            }
            Command::Number(value) => self.stack.set_x(value),
            Command::Op(op) => {
                self.flashing = self.apply(op).is_domain_error();
            }
        }

        Response::Display(self.display())
    }

    /// Run one operation through the engine.
    pub fn apply(&mut self, op: Operation) -> Outcome {
        ops::apply(op, &mut self.stack)
    }

    /// Start exponent entry from the current X.
    pub fn begin_exponent_entry(&self) -> ExponentEntry {
        ExponentEntry::seed(self.stack.x())
    }

    /// Store a finished exponent entry into X.
    pub fn commit_exponent(&mut self, entry: ExponentEntry) -> Result<LedDisplay, EntryError> {
        let value = entry.commit()?;
        self.stack.set_x(value);
        debug!(x = self.stack.x(), "exponent stored");
        Ok(self.display())
    }

    /// Run exponent entry over a key stream and store the result.
    ///
    /// On [`EntryError::Interrupted`] X keeps its previous value.
    pub fn enter_exponent<I, F>(&mut self, keys: I, render: F) -> Result<LedDisplay, EntryError>
    where
        I: IntoIterator<Item = char>,
        F: FnMut(&LedDisplay),
    {
        let value = self.begin_exponent_entry().drive(keys, render)?;
        self.stack.set_x(value);
        Ok(self.display())
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(calc: &mut Calculator, tokens: &[&str]) -> Response {
        let mut last = Response::Display(calc.display());
        for token in tokens {
            last = calc.dispatch(token);
        }
        last
    }

    fn shown(response: &Response) -> String {
        response.display().map(|d| d.text().to_string()).unwrap_or_default()
    }

    #[test]
    fn test_starts_at_zero() {
        let calc = Calculator::new();
        assert_eq!(calc.display().text(), "0.             ");
        assert!(calc.is_on());
    }

    #[test]
    fn test_enter_then_add() {
        let mut calc = Calculator::new();
        let response = keys(&mut calc, &["3", "e", "4", "+"]);
        assert_eq!(shown(&response), "7.             ");
        assert_eq!(calc.stack().y(), 3.0);
    }

    #[test]
    fn test_number_overwrites_x_without_push() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["3", "4"]);
        assert_eq!(calc.stack().x(), 4.0);
        assert_eq!(calc.stack().y(), 0.0);
    }

    #[test]
    fn test_domain_error_winks_once() {
        let mut calc = Calculator::new();
        let response = keys(&mut calc, &["4", "chs", "rx"]);
        assert!(response.display().is_some_and(|d| d.is_flash()));
        assert_eq!(calc.stack().x(), 0.0);

        // The wink is momentary: the next key shows X again.
        let response = calc.dispatch("clx");
        assert_eq!(shown(&response), "0.             ");
    }

    #[test]
    fn test_clear_zeroes_memory_too() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["5", "sto", "e", "e", "clr"]);
        assert_eq!(*calc.stack(), RegisterStack::new());
    }

    #[test]
    fn test_clear_x_keeps_the_stack() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["5", "e", "6", "clx"]);
        assert_eq!(calc.stack().x(), 0.0);
        assert_eq!(calc.stack().y(), 5.0);
    }

    #[test]
    fn test_store_and_recall() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["2.5", "sto", "9", "rcl"]);
        assert_eq!(calc.stack().x(), 2.5);
        assert_eq!(calc.stack().memory(), 2.5);
    }

    #[test]
    fn test_exchange_and_roll() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["1", "e", "2", "rv"]);
        assert_eq!((calc.stack().x(), calc.stack().y()), (1.0, 2.0));
        keys(&mut calc, &["rd"]);
        assert_eq!(calc.stack().x(), 2.0);
    }

    #[test]
    fn test_on_while_on() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["8"]);
        assert_eq!(calc.dispatch("on"), Response::AlreadyOn(crate::display::format(8.0)));
        assert_eq!(calc.stack().x(), 8.0);
    }

    #[test]
    fn test_off_blanks_and_ignores_keys() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["8"]);
        assert_eq!(calc.dispatch("off"), Response::PoweredOff);
        assert_eq!(calc.display().text(), "               ");
        assert_eq!(calc.dispatch("9"), Response::PoweredOff);
        assert_eq!(calc.stack().x(), 8.0);
    }

    #[test]
    fn test_power_cycle_clears() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["8", "sto", "off", "on"]);
        assert!(calc.is_on());
        assert_eq!(*calc.stack(), RegisterStack::new());
    }

    #[test]
    fn test_unknown_token_is_unimplemented() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["3", "e", "4"]);
        let before = calc.clone();
        assert_eq!(calc.dispatch("sqrt"), Response::Unimplemented("sqrt".into()));
        assert_eq!(calc, before);
    }

    #[test]
    fn test_every_vocabulary_token_is_implemented() {
        for (token, _) in crate::calc::VOCABULARY {
            let mut calc = Calculator::new();
            assert!(
                !matches!(calc.dispatch(token), Response::Unimplemented(_)),
                "token {token}"
            );
        }
    }

    #[test]
    fn test_exponent_entry_round_trip() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["1.5"]);
        let Response::ExponentEntry(mut entry) = calc.dispatch("eex") else {
            panic!("expected exponent entry");
        };
        entry.press_char('2').expect("digit");
        entry.press_char('5').expect("digit");
        let display = calc.commit_exponent(entry).expect("commit");
        assert_eq!(calc.stack().x(), 1.5e25);
        assert_eq!(display.text(), " 1.5         25");
    }

    #[test]
    fn test_interrupted_exponent_entry_keeps_x() {
        let mut calc = Calculator::new();
        keys(&mut calc, &["1.5"]);
        let result = calc.enter_exponent("2".chars(), |_| {});
        assert_eq!(result, Err(EntryError::Interrupted));
        assert_eq!(calc.stack().x(), 1.5);
    }

    #[test]
    fn test_tan_90_shows_edge_not_wink() {
        let mut calc = Calculator::new();
        let response = keys(&mut calc, &["90", "tan"]);
        assert_eq!(shown(&response), " 9.99999999  99");
    }
}
