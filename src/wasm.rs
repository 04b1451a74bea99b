//! WebAssembly bindings for the HP-35 emulator.
//!
//! This module provides JavaScript-friendly wrappers around the calculator.

use wasm_bindgen::prelude::*;
use crate::calc::{Calculator, Command, Response};
use crate::console::register_json;
use crate::display::{ExponentEntry, LedDisplay};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly calculator wrapper.
#[wasm_bindgen]
pub struct WasmCalculator {
    calc: Calculator,
    entry: Option<ExponentEntry>,
}

#[wasm_bindgen]
impl WasmCalculator {
    /// Create a switched-on calculator.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            calc: Calculator::new(),
            entry: None,
        }
    }

    /// Press a key given by its token. Returns the display text.
    ///
    /// While exponent entry is open, `token` is read as single keystrokes.
    #[wasm_bindgen]
    pub fn press(&mut self, token: &str) -> Result<String, JsError> {
        if let Some(mut entry) = self.entry.take() {
            for c in token.chars() {
                if let Ok(crate::display::EntryState::Confirmed) = entry.press_char(c) {
                    let display = self.calc.commit_exponent(entry)
                        .map_err(|e| JsError::new(&format!("{}", e)))?;
                    return Ok(display.text().to_string());
                }
            }
            let text = entry.display().text().to_string();
            self.entry = Some(entry);
            return Ok(text);
        }

        match self.calc.dispatch(token) {
            Response::Display(d) | Response::AlreadyOn(d) => Ok(d.text().to_string()),
            Response::PoweredOff => Ok(LedDisplay::blank().text().to_string()),
            Response::ExponentEntry(entry) => {
                let text = entry.display().text().to_string();
                self.entry = Some(entry);
                Ok(text)
            }
            Response::Unimplemented(token) => Err(JsError::new(&format!("Invalid entry: {}", token))),
        }
    }

    /// Check whether a token is a legal key.
    #[wasm_bindgen]
    pub fn is_key(token: &str) -> bool {
        Command::parse(token).is_ok()
    }

    /// Current display text.
    #[wasm_bindgen]
    pub fn display(&self) -> String {
        match &self.entry {
            Some(entry) => entry.display().text().to_string(),
            None => self.calc.display().text().to_string(),
        }
    }

    /// Whether the display is winking.
    #[wasm_bindgen]
    pub fn is_flashing(&self) -> bool {
        self.calc.display().is_flash()
    }

    /// Whether exponent entry is open.
    #[wasm_bindgen]
    pub fn in_exponent_entry(&self) -> bool {
        self.entry.is_some()
    }

    #[wasm_bindgen]
    pub fn is_on(&self) -> bool {
        self.calc.is_on()
    }

    #[wasm_bindgen]
    pub fn x(&self) -> f64 {
        self.calc.stack().x()
    }

    #[wasm_bindgen]
    pub fn memory(&self) -> f64 {
        self.calc.stack().memory()
    }

    /// Get X, Y, Z, T as a typed array, X first.
    #[wasm_bindgen]
    pub fn stack_all(&self) -> js_sys::Float64Array {
        let s = self.calc.stack();
        js_sys::Float64Array::from(&[s.x(), s.y(), s.z(), s.t()][..])
    }

    /// Get registers as JSON string.
    #[wasm_bindgen]
    pub fn registers_json(&self) -> String {
        register_json(&self.calc).to_string()
    }

    /// Switch off and back on, clearing everything.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.calc = Calculator::new();
        self.entry = None;
    }
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a value the way the LED display would show it.
#[wasm_bindgen]
pub fn wasm_format(value: f64) -> String {
    crate::display::format(value).text().to_string()
}
