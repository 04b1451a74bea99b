//! Configuration for hp35-emu.
//!
//! Configuration is taken from several sources in priority order:
//! 1. Command-line flags
//! 2. Environment variables (`HP35_LED_COLOR`, `HP35_POWER_DOWN_MS`)
//! 3. Built-in defaults

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable selecting the LED color.
pub const ENV_LED_COLOR: &str = "HP35_LED_COLOR";
/// Environment variable setting the power-down delay in milliseconds.
pub const ENV_POWER_DOWN_MS: &str = "HP35_POWER_DOWN_MS";

/// Color of the LED digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum LedColor {
    #[default]
    #[value(name = "W", alias = "w")]
    White,
    #[value(name = "G", alias = "g")]
    Green,
    #[value(name = "Y", alias = "y")]
    Yellow,
    #[value(name = "R", alias = "r")]
    Red,
    #[value(name = "B", alias = "b")]
    Blue,
    #[value(name = "M", alias = "m")]
    Magenta,
    #[value(name = "C", alias = "c")]
    Cyan,
}

impl LedColor {
    /// Parse the single-letter code used on the command line.
    pub fn from_letter(letter: &str) -> Option<Self> {
        Self::from_str(letter.trim(), true).ok()
    }

    /// Terminal color used for the LED digits.
    #[cfg(feature = "tui")]
    pub fn terminal_color(self) -> crossterm::style::Color {
        use crossterm::style::Color;
        match self {
            LedColor::White => Color::White,
            LedColor::Green => Color::Green,
            LedColor::Yellow => Color::Yellow,
            LedColor::Red => Color::Red,
            LedColor::Blue => Color::Blue,
            LedColor::Magenta => Color::Magenta,
            LedColor::Cyan => Color::Cyan,
        }
    }

    /// Style `text` as lit LED segments: bold in this color, blinking when
    /// `blink` is set.
    #[cfg(feature = "tui")]
    pub fn paint(self, text: &str, blink: bool) -> String {
        use crossterm::style::{Attribute, Stylize};
        let styled = text.with(self.terminal_color()).attribute(Attribute::Bold);
        if blink {
            styled.attribute(Attribute::SlowBlink).to_string()
        } else {
            styled.to_string()
        }
    }

    /// Without a terminal backend the text is left unstyled.
    #[cfg(not(feature = "tui"))]
    pub fn paint(self, text: &str, _blink: bool) -> String {
        text.to_string()
    }
}

/// hp35-emu configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LED digit color.
    pub led_color: LedColor,

    /// Dump the registers after every command.
    pub verbose: bool,

    /// Dump registers as JSON instead of text.
    pub json: bool,

    /// Pause after `off` before the process exits.
    pub power_down_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            led_color: LedColor::default(),
            verbose: false,
            json: false,
            power_down_delay_ms: 300,
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(letter) = lookup(ENV_LED_COLOR) {
            match LedColor::from_letter(&letter) {
                Some(color) => self.led_color = color,
                None => tracing::warn!(value = %letter, "ignoring {ENV_LED_COLOR}"),
            }
        }

        if let Some(ms) = lookup(ENV_POWER_DOWN_MS) {
            match ms.trim().parse() {
                Ok(ms) => self.power_down_delay_ms = ms,
                Err(_) => tracing::warn!(value = %ms, "ignoring {ENV_POWER_DOWN_MS}"),
            }
        }
    }

    pub fn power_down_delay(&self) -> Duration {
        Duration::from_millis(self.power_down_delay_ms)
    }
}
