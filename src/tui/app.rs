//! Panel application state and logic.

use crate::calc::{Calculator, Response};
use crate::config::Config;
use crate::display::{EntryError, EntryState, ExponentEntry, LedDisplay};
use std::time::{Duration, Instant};
use tracing::debug;

/// Panel application state.
pub struct PanelApp {
    /// The calculator being driven.
    pub calc: Calculator,
    /// Colors and delays.
    pub config: Config,
    /// Token being typed.
    pub input: String,
    /// Exponent entry in progress, if E EX was pressed.
    pub entry: Option<ExponentEntry>,
    /// Should we quit?
    pub should_quit: bool,
    /// When to quit after `off`.
    pub power_down_at: Option<Instant>,
    /// Status message to display.
    pub status: String,
    /// Blink phase for the wink display.
    pub blink_on: bool,
}

impl PanelApp {
    /// Create a panel with a fresh calculator.
    pub fn new(config: Config) -> Self {
        Self {
            calc: Calculator::new(),
            config,
            input: String::new(),
            entry: None,
            should_quit: false,
            power_down_at: None,
            status: "Ready. Type a key token and press Enter. Esc quits.".into(),
            blink_on: true,
        }
    }

    /// What the LED row shows right now.
    pub fn display(&self) -> LedDisplay {
        match &self.entry {
            Some(entry) => entry.display(),
            None => self.calc.display(),
        }
    }

    /// Whether the LED row should be lit this frame.
    pub fn led_lit(&self) -> bool {
        !self.display().is_flash() || self.blink_on
    }

    /// Add a typed character.
    pub fn type_char(&mut self, c: char) {
        if self.power_down_at.is_some() {
            return;
        }
        match self.entry.as_mut() {
            Some(entry) => match entry.press_char(c) {
                Ok(EntryState::Editing) => {}
                Ok(EntryState::Confirmed) => self.finish_exponent(),
                Err(EntryError::InvalidKey(c)) => debug!(key = ?c, "ignored during exponent entry"),
                Err(e) => self.status = format!("Error: {}", e),
            },
            None => self.input.push(c),
        }
    }

    /// Remove the last typed character.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Enter was pressed.
    pub fn submit(&mut self) {
        if self.entry.is_some() {
            self.type_char('\n');
            return;
        }
        let token = std::mem::take(&mut self.input);
        if token.trim().is_empty() {
            return;
        }
        self.dispatch(&token);
    }

    /// Send a token to the calculator.
    pub fn dispatch(&mut self, token: &str) {
        match self.calc.dispatch(token) {
            Response::Display(display) => {
                self.status = if display.is_flash() {
                    format!("{}: error", token.trim())
                } else {
                    format!("{}", token.trim())
                };
            }
            Response::AlreadyOn(_) => self.status = "Calculator is already on.".into(),
            Response::Unimplemented(_) => self.status = "Invalid entry".into(),
            Response::ExponentEntry(entry) => {
                self.entry = Some(entry);
                self.status = "E EX: digits, '-' for sign, Enter to confirm".into();
            }
            Response::PoweredOff => {
                self.status = "HP-35 is powering down".into();
                self.power_down_at = Some(Instant::now() + self.config.power_down_delay());
            }
        }
    }

    fn finish_exponent(&mut self) {
        let Some(entry) = self.entry.take() else {
            return;
        };
        match self.calc.commit_exponent(entry) {
            Ok(display) => self.status = format!("eex: {}", display.text().trim()),
            Err(e) => self.status = format!("Error: {}", e),
        }
    }

    /// Advance the blink phase and the power-down timer.
    pub fn tick(&mut self, now: Instant) {
        self.blink_on = !self.blink_on;
        if self.power_down_at.is_some_and(|at| now >= at) {
            self.should_quit = true;
        }
    }
}

/// Run the front panel.
pub fn run_panel(config: Config) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = PanelApp::new(config);
    let blink = Duration::from_millis(400);
    let mut last_tick = Instant::now();

    // Main loop
    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => app.should_quit = true,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.should_quit = true;
                        }
                        KeyCode::Enter => app.submit(),
                        KeyCode::Backspace => app.backspace(),
                        KeyCode::Char(c) => app.type_char(c),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= blink {
            last_tick = Instant::now();
            app.tick(last_tick);
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
