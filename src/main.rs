//! HP-35 Emulator - CLI Entry Point
//!
//! Commands:
//! - `hp35-emu run` - Line-mode calculator (default)
//! - `hp35-emu panel` - Full-screen front panel
//! - `hp35-emu eval <tokens>...` - Dispatch keys and print each display

use clap::{Parser, Subcommand};
use hp35::config::{Config, LedColor};
use hp35::console::{self, Console, SessionEnd};
use hp35::Calculator;
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "hp35-emu")]
#[command(about = "An emulator of the HP-35 (1972) pocket scientific calculator")]
struct Cli {
    /// Dump X, Y, Z, T and M after every key
    #[arg(short = 'V', long, global = true)]
    verbose: bool,

    /// LED color: W, G, Y, R, B, M or C
    #[arg(short, long, global = true, value_enum)]
    display: Option<LedColor>,

    /// Dump registers as JSON (with --verbose)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Line-mode calculator
    Run,
    /// Full-screen front panel
    Panel,
    /// Dispatch each token and print the display it leaves
    Eval {
        /// Key tokens, e.g. `3 e 4 +`. `eex` takes the next token as its keys.
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::load();
        if let Some(color) = self.display {
            config.led_color = color;
        }
        config.verbose |= self.verbose;
        config.json |= self.json;
        config
    }
}

fn main() {
    hp35::logging::init_logging();

    let cli = Cli::parse();
    let config = cli.config();

    let result = match cli.command {
        None | Some(Commands::Run) => run_console(config),
        Some(Commands::Panel) => run_panel(config),
        Some(Commands::Eval { tokens }) => run_eval(&tokens, &config),
    };

    if let Err(e) = result {
        eprintln!("hp35-emu: {}", e);
        std::process::exit(1);
    }
}

fn run_console(config: Config) -> io::Result<()> {
    #[cfg(feature = "tui")]
    let end = if io::IsTerminal::is_terminal(&io::stdin()) {
        Console::new(config, console::RawKeys::new(), io::stdout()).run()?
    } else {
        Console::new(config, console::LineKeys::new(io::stdin().lock()), io::stdout()).run()?
    };
    #[cfg(not(feature = "tui"))]
    let end = Console::new(config, console::LineKeys::new(io::stdin().lock()), io::stdout()).run()?;

    tracing::info!(?end, "session ended");
    Ok(())
}

#[cfg(feature = "tui")]
fn run_panel(config: Config) -> io::Result<()> {
    hp35::run_panel(config)
}

#[cfg(not(feature = "tui"))]
fn run_panel(_config: Config) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "built without the `tui` feature",
    ))
}

fn run_eval(tokens: &[String], config: &Config) -> io::Result<()> {
    let mut calc = Calculator::new();
    let mut out = io::stdout().lock();
    let end = console::eval(&mut calc, tokens, config, &mut out)?;
    out.flush()?;
    if end == SessionEnd::PoweredOff {
        std::thread::sleep(config.power_down_delay());
    }
    Ok(())
}
