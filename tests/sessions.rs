//! Keystroke sessions driven through the calculator's token dispatch.

use hp35::calc::{Calculator, Response};
use hp35::config::Config;
use hp35::console::{self, Console, LineKeys, SessionEnd};

fn press(calc: &mut Calculator, tokens: &str) -> Response {
    let mut last = Response::Display(calc.display());
    for token in tokens.split_whitespace() {
        last = calc.dispatch(token);
    }
    last
}

fn shown(calc: &mut Calculator, tokens: &str) -> String {
    press(calc, tokens);
    calc.display().text().to_string()
}

#[test]
fn enter_then_type() {
    let mut calc = Calculator::new();
    press(&mut calc, "3 e 4");
    assert_eq!(calc.stack().x(), 4.0);
    assert_eq!(calc.stack().y(), 3.0);
}

#[test]
fn chain_arithmetic() {
    let mut calc = Calculator::new();
    // (3 + 4) × 5 with an explicit push before each operand.
    assert_eq!(shown(&mut calc, "3 e 4 + e 5 x"), "35.            ");
    assert_eq!(shown(&mut calc, "e 7 /"), "5.             ");
    assert_eq!(shown(&mut calc, "e 2 -"), "3.             ");
}

#[test]
fn square_root_of_negative_winks() {
    let mut calc = Calculator::new();
    let response = press(&mut calc, "4 chs rx");
    assert_eq!(response.display().map(|d| d.is_flash()), Some(true));
    assert_eq!(calc.stack().x(), 0.0);
}

#[test]
fn divide_by_zero_winks() {
    let mut calc = Calculator::new();
    let response = press(&mut calc, "5 e 0 /");
    assert_eq!(response.display().map(|d| d.text().to_string()).as_deref(), Some("0.0            "));
    assert_eq!(calc.stack().x(), 0.0);
}

#[test]
fn tangent_at_ninety_is_not_an_error() {
    let mut calc = Calculator::new();
    let response = press(&mut calc, "90 tan");
    let display = response.display().expect("display");
    assert!(!display.is_flash());
    assert_eq!(calc.stack().x(), 9.99999999e99);
}

#[test]
fn trig_keys_work_in_degrees() {
    let mut calc = Calculator::new();
    assert_eq!(shown(&mut calc, "30 sin"), "0.5            ");
    assert_eq!(shown(&mut calc, "450 sin"), "1.             ");
    assert_eq!(shown(&mut calc, "1 at"), "45.            ");
    assert_eq!(shown(&mut calc, "2 as"), "0.0            ");
}

#[test]
fn power_and_logs() {
    let mut calc = Calculator::new();
    assert_eq!(shown(&mut calc, "2 e 10 xy"), "1024.          ");
    assert_eq!(shown(&mut calc, "1000 log"), "3.             ");
    assert_eq!(shown(&mut calc, "1 ex ln"), "1.             ");
}

#[test]
fn pi_key_enters_ten_digits_and_shows_nine() {
    let mut calc = Calculator::new();
    assert_eq!(shown(&mut calc, "pi"), "3.14159265     ");
}

#[test]
fn memory_survives_clear_x_but_not_clear() {
    let mut calc = Calculator::new();
    press(&mut calc, "42 sto clx rcl");
    assert_eq!(calc.stack().x(), 42.0);
    press(&mut calc, "clr rcl");
    assert_eq!(calc.stack().x(), 0.0);
}

#[test]
fn large_results_switch_to_exponent_display() {
    let mut calc = Calculator::new();
    assert_eq!(shown(&mut calc, "100000 e x"), " 1.          10");
    assert_eq!(shown(&mut calc, "0.001"), " 1.         -03");
}

#[test]
fn overflowing_product_winks() {
    let mut calc = Calculator::new();
    let response = press(&mut calc, "1e60 e x");
    assert_eq!(response.display().map(|d| d.is_flash()), Some(true));
}

#[test]
fn exponent_entry_from_one_and_a_half() {
    let mut calc = Calculator::new();
    press(&mut calc, "1.5");
    let display = calc.enter_exponent("25\n".chars(), |_| {}).expect("confirmed");
    assert_eq!(calc.stack().x(), 1.5e25);
    assert_eq!(display.text(), " 1.5         25");
}

#[test]
fn exponent_entry_on_zero_seeds_one() {
    let mut calc = Calculator::new();
    calc.enter_exponent("-3\n".chars(), |_| {}).expect("confirmed");
    assert_eq!(calc.stack().x(), 0.001);
}

#[test]
fn off_ends_the_console_session() {
    let config = Config {
        power_down_delay_ms: 0,
        ..Config::default()
    };
    let mut console = Console::new(config, LineKeys::new("12\noff\n7\n".as_bytes()), Vec::new());
    console.color = false;
    assert_eq!(console.run().expect("session"), SessionEnd::PoweredOff);
    assert_eq!(console.calc.stack().x(), 12.0);
    let out = String::from_utf8(console.into_output()).expect("utf8");
    assert!(out.contains("HP-35 is powering down"));
}

#[test]
fn eval_prints_one_display_per_token() {
    let tokens: Vec<String> = "1.5 eex 25 rcl sqrt".split(' ').map(String::from).collect();
    let mut calc = Calculator::new();
    let mut out = Vec::new();
    console::eval(&mut calc, &tokens, &Config::default(), &mut out).expect("eval");
    let out = String::from_utf8(out).expect("utf8");
    assert_eq!(
        out.lines().collect::<Vec<_>>(),
        vec![
            "[1.5            ]",
            "[ 1.5         25]",
            "[0.             ]",
            "Invalid entry: sqrt",
        ]
    );
}
