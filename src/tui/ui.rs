//! UI rendering for the front panel.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    style::{Color, Style, Modifier},
};
use crate::calc::Register;
use crate::config::LedColor;
use crate::display::panel::KEYPAD;
use super::app::PanelApp;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &PanelApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(44),
            Constraint::Min(30),
        ])
        .split(frame.area());

    // Left side: the calculator itself
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
        ])
        .split(chunks[0]);

    draw_led(frame, left_chunks[0], app);
    draw_switch(frame, left_chunks[1], app);
    draw_keypad(frame, left_chunks[2]);

    // Right side: registers, input and help
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
        ])
        .split(chunks[1]);

    draw_registers(frame, right_chunks[0], app);
    draw_input(frame, right_chunks[1], app);
    draw_status(frame, right_chunks[2], app);
    draw_help(frame, right_chunks[3]);
}

/// Draw the LED row, double spaced.
fn draw_led(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let display = app.display();
    let text = if app.led_lit() {
        display.spaced()
    } else {
        " ".repeat(display.spaced().chars().count())
    };

    let mut style = Style::default()
        .fg(led_color(app.config.led_color))
        .add_modifier(Modifier::BOLD);
    if display.is_flash() {
        style = style.add_modifier(Modifier::SLOW_BLINK);
    }

    let led = Paragraph::new(Line::from(Span::styled(text, style)))
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black))
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)));

    frame.render_widget(led, area);
}

/// Draw the power switch.
fn draw_switch(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let (off, on) = if app.calc.is_on() {
        (Style::default().fg(Color::DarkGray), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        (Style::default().fg(Color::Red).add_modifier(Modifier::BOLD), Style::default().fg(Color::DarkGray))
    };
    let switch = if app.calc.is_on() { " ═" } else { "═ " };

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled("OFF", off),
        Span::raw(switch),
        Span::styled("ON", on),
    ]);

    let paragraph = Paragraph::new(line)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)));

    frame.render_widget(paragraph, area);
}

/// Draw the keyboard legend.
fn draw_keypad(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::with_capacity(KEYPAD.len() * 2);
    for (i, row) in KEYPAD.iter().enumerate() {
        // Function rows are printed in gold on the real keyboard.
        let style = if i < 4 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(format!(" {row}"), style)));
        lines.push(Line::from(""));
    }

    let keypad = Paragraph::new(lines)
        .block(Block::default()
            .title(" h/p  HEWLETT-PACKARD ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)));

    frame.render_widget(keypad, area);
}

/// Draw register state.
fn draw_registers(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let stack = app.calc.stack();

    let mut content: Vec<Line> = Register::ALL
        .iter()
        .rev()
        .map(|reg| {
            let style = if *reg == Register::X {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::raw(format!("{}: ", reg)),
                Span::styled(format!("{:>20}", stack.get(*reg)), style),
            ])
        })
        .collect();

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw("M: "),
        Span::styled(format!("{:>20}", stack.memory()), Style::default().fg(Color::Cyan)),
    ]));
    content.push(Line::from(vec![
        Span::raw("Keys: "),
        Span::styled(format!("{}", app.calc.keystrokes), Style::default().fg(Color::Cyan)),
    ]));

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Registers ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw the token being typed.
fn draw_input(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let (title, text) = if app.entry.is_some() {
        (" E EX ", String::from("> exponent keys"))
    } else {
        (" Input ", format!("> {}_", app.input))
    };

    let input = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(input, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("xy log ln ex clr  rx as ac at"),
        Line::from("sin cos tan  1x rv rd sto rcl"),
        Line::from("e chs eex clx  + - x /  pi"),
        Line::from("Enter: key  Esc: quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Keys ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// Terminal color for the LED digits.
fn led_color(color: LedColor) -> Color {
    match color {
        LedColor::White => Color::White,
        LedColor::Green => Color::LightGreen,
        LedColor::Yellow => Color::Yellow,
        LedColor::Red => Color::LightRed,
        LedColor::Blue => Color::LightBlue,
        LedColor::Magenta => Color::LightMagenta,
        LedColor::Cyan => Color::LightCyan,
    }
}
