//! Line-oriented front end.
//!
//! The console draws the front panel, prints the key menu, reads one token
//! per line and hands it to the [`Calculator`]. E EX switches to single-key
//! reads until Enter confirms the exponent.

use crate::calc::{Calculator, Response};
use crate::config::Config;
use crate::display::{panel, EntryError, EntryState, ExponentEntry, LedDisplay};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Printed when an illegal token is typed.
pub const INVALID_ENTRY: &str = "Invalid entry";
/// Printed when `on` is typed while already on.
pub const ALREADY_ON: &str = "Calculator is already on.";
/// Printed when `off` is typed.
pub const POWERING_DOWN: &str = "HP-35 is powering down";
/// Printed when input ends or Ctrl-C is pressed.
pub const INTERRUPTED: &str = "Keyboard interrupt by user";

/// Where keystrokes come from.
pub trait KeySource {
    /// Read one token. `None` means the input is finished.
    fn next_token(&mut self) -> io::Result<Option<String>>;

    /// Read one keystroke for exponent entry. Enter arrives as `'\n'`.
    /// `None` means the operator interrupted.
    fn next_key(&mut self) -> io::Result<Option<char>>;
}

/// Keys read from any buffered reader, one token per line.
///
/// During exponent entry the characters of each line are delivered one at
/// a time, followed by `'\n'`.
pub struct LineKeys<R> {
    reader: R,
    pending: VecDeque<char>,
}

impl<R: BufRead> LineKeys<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead> KeySource for LineKeys<R> {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        self.pending.clear();
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    fn next_key(&mut self) -> io::Result<Option<char>> {
        if self.pending.is_empty() {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            self.pending.extend(line.chars());
            self.pending.push_back('\n');
        }
        Ok(self.pending.pop_front())
    }
}

/// Keys read from the terminal in raw mode, so exponent digits take effect
/// without waiting for Enter and Ctrl-C ends the session at any prompt.
#[cfg(feature = "tui")]
#[derive(Debug, Default)]
pub struct RawKeys;

#[cfg(feature = "tui")]
impl RawKeys {
    pub fn new() -> Self {
        Self
    }
}

/// Leaves raw mode when dropped.
#[cfg(feature = "tui")]
struct RawModeGuard;

#[cfg(feature = "tui")]
impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

#[cfg(feature = "tui")]
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// What one key does to the line being typed.
#[cfg(feature = "tui")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Erase,
    /// Enter: the finished line.
    Line(String),
    /// Ctrl-C, or Ctrl-D on an empty line.
    Interrupted,
    Ignored,
}

/// Line editing over raw key events.
#[cfg(feature = "tui")]
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

#[cfg(feature = "tui")]
impl LineEditor {
    pub fn feed(&mut self, key: crossterm::event::KeyEvent) -> Edit {
        use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

        if key.kind != KeyEventKind::Press {
            return Edit::Ignored;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if control => Edit::Interrupted,
            KeyCode::Char('d') if control && self.buffer.is_empty() => Edit::Interrupted,
            KeyCode::Char(_) if control => Edit::Ignored,
            KeyCode::Char(c) => {
                self.buffer.push(c);
                Edit::Insert(c)
            }
            KeyCode::Backspace => match self.buffer.pop() {
                Some(_) => Edit::Erase,
                None => Edit::Ignored,
            },
            KeyCode::Enter => Edit::Line(std::mem::take(&mut self.buffer)),
            _ => Edit::Ignored,
        }
    }
}

#[cfg(feature = "tui")]
impl KeySource for RawKeys {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        use crossterm::cursor::MoveLeft;
        use crossterm::event::{self, Event};
        use crossterm::style::Print;
        use crossterm::terminal::{Clear, ClearType};
        use crossterm::queue;

        let mut editor = LineEditor::default();
        let mut out = io::stdout();
        let _raw = RawModeGuard::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match editor.feed(key) {
                Edit::Insert(c) => queue!(out, Print(c))?,
                Edit::Erase => queue!(out, MoveLeft(1), Clear(ClearType::UntilNewLine))?,
                Edit::Line(line) => {
                    queue!(out, Print("\r\n"))?;
                    out.flush()?;
                    return Ok(Some(line.trim().to_string()));
                }
                Edit::Interrupted => {
                    queue!(out, Print("\r\n"))?;
                    out.flush()?;
                    return Ok(None);
                }
                Edit::Ignored => {}
            }
            out.flush()?;
        }
    }

    fn next_key(&mut self) -> io::Result<Option<char>> {
        use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

        let _raw = RawModeGuard::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None);
                }
                KeyCode::Enter => return Ok(Some('\n')),
                KeyCode::Char(c) => return Ok(Some(c)),
                _ => {}
            }
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// `off` was pressed.
    PoweredOff,
    /// Input ran out or the operator pressed Ctrl-C.
    Interrupted,
    /// A batch of tokens ran to the end.
    Completed,
}

/// A console session.
pub struct Console<K, W> {
    pub calc: Calculator,
    config: Config,
    keys: K,
    out: W,
    /// Emit ANSI color and blink codes around the LED row.
    pub color: bool,
}

impl<K: KeySource, W: Write> Console<K, W> {
    pub fn new(config: Config, keys: K, out: W) -> Self {
        Self {
            calc: Calculator::new(),
            config,
            keys,
            out,
            color: true,
        }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    fn paint(&self, display: &LedDisplay) -> impl Fn(&str) -> String {
        let color = self.color.then_some(self.config.led_color);
        let blink = display.is_flash();
        move |text: &str| match color {
            Some(c) => c.paint(text, blink),
            None => text.to_string(),
        }
    }

    fn draw_panel(&mut self, display: &LedDisplay) -> io::Result<()> {
        let paint = self.paint(display);
        let text = panel::draw(display, self.calc.is_on(), paint);
        write!(self.out, "{text}")
    }

    fn draw_led(&mut self, display: &LedDisplay) -> io::Result<()> {
        let paint = self.paint(display);
        let text = panel::led_frame(display, paint);
        write!(self.out, "{text}\n> \n")
    }

    fn dump_registers(&mut self) -> io::Result<()> {
        if self.config.json {
            let dump = register_json(&self.calc);
            writeln!(self.out, "{dump}")
        } else {
            writeln!(self.out, "{}", self.calc.stack())
        }
    }

    /// Run until `off` or the input ends.
    pub fn run(&mut self) -> io::Result<SessionEnd> {
        loop {
            let display = self.calc.display();
            self.draw_panel(&display)?;
            write!(self.out, "{}\n> ", panel::key_menu())?;
            self.out.flush()?;

            let Some(token) = self.keys.next_token()? else {
                return self.interrupted();
            };

            match self.calc.dispatch(&token) {
                Response::Display(_) => {}
                Response::AlreadyOn(_) => writeln!(self.out, "{ALREADY_ON}\n")?,
                Response::Unimplemented(_) => writeln!(self.out, "{INVALID_ENTRY}\n")?,
                Response::PoweredOff => return self.power_down(),
                Response::ExponentEntry(entry) => {
                    if self.exponent_entry(entry)?.is_none() {
                        return self.interrupted();
                    }
                }
            }

            if self.config.verbose {
                self.dump_registers()?;
            }
        }
    }

    /// Feed single keys to the exponent machine until Enter.
    ///
    /// Returns `None` if the operator interrupted.
    fn exponent_entry(&mut self, mut entry: ExponentEntry) -> io::Result<Option<LedDisplay>> {
        self.draw_led(&entry.display())?;
        self.out.flush()?;

        loop {
            let Some(c) = self.keys.next_key()? else {
                return Ok(None);
            };
            match entry.press_char(c) {
                Ok(EntryState::Editing) => {
                    self.draw_led(&entry.display())?;
                    self.out.flush()?;
                }
                Ok(EntryState::Confirmed) => break,
                Err(EntryError::InvalidKey(c)) => debug!(key = ?c, "ignored during exponent entry"),
                Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
            }
        }

        self.calc
            .commit_exponent(entry)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn power_down(&mut self) -> io::Result<SessionEnd> {
        self.draw_panel(&LedDisplay::blank())?;
        writeln!(self.out, "{POWERING_DOWN}")?;
        self.out.flush()?;
        std::thread::sleep(self.config.power_down_delay());
        Ok(SessionEnd::PoweredOff)
    }

    fn interrupted(&mut self) -> io::Result<SessionEnd> {
        writeln!(self.out, "\n{INTERRUPTED}")?;
        self.out.flush()?;
        Ok(SessionEnd::Interrupted)
    }
}

/// Registers and display as a JSON object.
pub fn register_json(calc: &Calculator) -> serde_json::Value {
    let stack = calc.stack();
    serde_json::json!({
        "x": stack.x(),
        "y": stack.y(),
        "z": stack.z(),
        "t": stack.t(),
        "m": stack.memory(),
        "display": calc.display().text(),
    })
}

/// Dispatch a list of tokens without drawing the panel.
///
/// Each token prints the resulting 15-character display. `eex` takes the
/// next token as its keystrokes and confirms after them.
pub fn eval<W: Write>(calc: &mut Calculator, tokens: &[String], config: &Config, out: &mut W) -> io::Result<SessionEnd> {
    let mut tokens = tokens.iter();

    while let Some(token) = tokens.next() {
        match calc.dispatch(token) {
            Response::Display(display) => writeln!(out, "[{display}]")?,
            Response::AlreadyOn(display) => writeln!(out, "[{display}] {ALREADY_ON}")?,
            Response::Unimplemented(token) => writeln!(out, "{INVALID_ENTRY}: {token}")?,
            Response::PoweredOff => {
                writeln!(out, "[{}] {POWERING_DOWN}", LedDisplay::blank())?;
                return Ok(SessionEnd::PoweredOff);
            }
            Response::ExponentEntry(_) => {
                let keys = tokens.next().map(String::as_str).unwrap_or("");
                let stream = keys.chars().chain(std::iter::once('\n'));
                let display = calc
                    .enter_exponent(stream, |_| {})
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                writeln!(out, "[{display}]")?;
            }
        }

        if config.verbose {
            if config.json {
                writeln!(out, "{}", register_json(calc))?;
            } else {
                writeln!(out, "{}", calc.stack())?;
            }
        }
    }

    Ok(SessionEnd::Completed)
}
