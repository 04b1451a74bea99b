//! Text drawing of the HP-35 front panel.
//!
//! The LED row is double spaced so the characters sit apart the way the
//! segments did on the real display. Styling is left to the caller through
//! a `paint` hook; this module only lays out characters.

use crate::display::LedDisplay;

/// Inner width of the panel frame.
const PANEL_WIDTH: usize = 38;

/// Key legend printed under the display, one row per keyboard row.
pub const KEYPAD: [&str; 8] = [
    "Xʸ     log    ln      eˣ    CLR",
    "√x     arc    sin    cos    tan",
    "1/x    x⇆y    R↓     STO    RCL",
    "ENTER↑       CHS    E EX   CL x",
    "  -      7        8        9",
    "  +      4        5        6",
    "  ×      1        2        3",
    "  ÷      0        ·        π",
];

/// Short tokens the prompt accepts, laid out like the keyboard.
pub const KEY_MENU: [&str; 8] = [
    "xy    log    ln    ex    clr",
    "rx    a<s,c,t>   sin   cos   tan",
    "1x    rv     rd    sto   rcl",
    "e(nter)      chs   eex   clx",
    "-     7      8     9",
    "+     4      5     6",
    "x     1      2     3",
    "/     0      .     pi",
];

fn frame_line(content: &str) -> String {
    let width = content.chars().count();
    let pad = PANEL_WIDTH.saturating_sub(width);
    format!("|{content}{}|", " ".repeat(pad))
}

/// Draw the whole panel.
///
/// `paint` receives the spaced LED characters and returns them styled.
pub fn draw<F>(display: &LedDisplay, power_on: bool, paint: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::new();
    out.push_str(&led_frame(display, paint));

    let switch = if power_on { "   OFF ═ON" } else { "   OFF═ ON" };
    out.push_str(&frame_line(""));
    out.push('\n');
    out.push_str(&frame_line(switch));
    out.push('\n');
    out.push_str(&frame_line(""));
    out.push('\n');

    for row in KEYPAD {
        out.push_str(&frame_line(&format!("   {row}")));
        out.push('\n');
        out.push_str(&frame_line(""));
        out.push('\n');
    }

    out.push_str(&format!("|{}|\n", "_".repeat(PANEL_WIDTH)));
    out.push_str(&frame_line("  h/p  H E W L E T T - P A C K A R D"));
    out.push('\n');
    out.push_str(&format!("└{}┘\n", "-".repeat(PANEL_WIDTH)));
    out
}

/// Draw only the display window, as shown during exponent entry.
pub fn led_frame<F>(display: &LedDisplay, paint: F) -> String
where
    F: Fn(&str) -> String,
{
    format!(
        "┌{dash}┐\n|     {led}    |\n|{under}|\n",
        dash = "-".repeat(PANEL_WIDTH),
        led = paint(&display.spaced()),
        under = "_".repeat(PANEL_WIDTH),
    )
}

/// The token menu printed before each prompt.
pub fn key_menu() -> String {
    let mut out = String::from("\noff  on\n");
    for row in KEY_MENU {
        out.push_str(row);
        out.push('\n');
    }
    out
}
