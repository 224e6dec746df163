//! xmlconf demo shell — entry point.
//!
//! A command-line stand-in for a settings window: it opens `Config.xml`
//! (creating it from defaults on first run), applies any changes given on
//! the command line, prints the resulting preferences and saves on exit.
//!
//! # Usage
//!
//! ```text
//! xmlconf-demo [OPTIONS]
//!
//! Options:
//!   --config <PATH>         Settings file [default: Config.xml]
//!   --full-screen <BOOL>    Start maximised (true/false, yes/no, 1/0)
//!   --font-size <NUMBER>    New font size
//!   --digits <N>            Fractional digits kept for --font-size
//!   --list                  Print every stored setting
//! ```
//!
//! | Variable              | Default      | Description                  |
//! |-----------------------|--------------|------------------------------|
//! | `XMLCONF_PATH`        | `Config.xml` | Settings file                |
//! | `XMLCONF_FULL_SCREEN` | unset        | Same as `--full-screen`      |
//! | `XMLCONF_FONT_SIZE`   | unset        | Same as `--font-size`        |
//! | `XMLCONF_DIGITS`      | unset        | Same as `--digits`           |
//! | `XMLCONF_LIST`        | `false`      | Same as `--list`             |

use std::path::PathBuf;

use anyhow::Context;
use clap::builder::BoolishValueParser;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xmlconf_demo::application::DisplaySettings;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Display preferences stored in an XML settings file.
#[derive(Debug, Parser)]
#[command(
    name = "xmlconf-demo",
    about = "Reads and updates display preferences stored in an XML settings file",
    version
)]
struct Cli {
    /// Settings file to load and save.
    #[arg(long, default_value = "Config.xml", env = "XMLCONF_PATH")]
    config: PathBuf,

    /// Store whether the window starts maximised.
    #[arg(long, value_parser = BoolishValueParser::new(), env = "XMLCONF_FULL_SCREEN")]
    full_screen: Option<bool>,

    /// Store a new font size.  Negative or non-numeric input is rejected.
    #[arg(long, env = "XMLCONF_FONT_SIZE")]
    font_size: Option<String>,

    /// Keep at most this many fractional digits of `--font-size`.
    #[arg(long, env = "XMLCONF_DIGITS")]
    digits: Option<u32>,

    /// Print every stored setting after applying changes.
    #[arg(long, env = "XMLCONF_LIST")]
    list: bool,
}

impl Cli {
    /// Digit limit in the store's convention, where negative means "all".
    fn digit_limit(&self) -> anyhow::Result<i32> {
        match self.digits {
            Some(d) => i32::try_from(d).with_context(|| format!("--digits {d} is too large")),
            None => Ok(-1),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let digits = cli.digit_limit()?;

    info!("opening settings at {}", cli.config.display());
    let mut display = DisplaySettings::open(&cli.config);

    if let Some(on) = cli.full_screen {
        let state = display.set_full_screen(on);
        info!("full screen {}", if state { "enabled" } else { "disabled" });
    }

    if let Some(text) = cli.font_size.as_deref() {
        display
            .apply_font_size(text, digits)
            .with_context(|| format!("invalid --font-size {text:?}"))?;
    }

    println!(
        "Window:    {}",
        if display.is_full_screen() { "maximised" } else { "normal" }
    );
    match display.font_size() {
        Some(size) => println!("Font size: {size}"),
        None => println!("Font size: {:?} (not applied)", display.font_size_text()),
    }

    if cli.list {
        for (key, value) in display.store().settings() {
            println!("  {key} = {value}");
        }
    }

    display.close();
    Ok(())
}
