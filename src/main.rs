use std::{
    io::{self, Write},
    process::ExitCode,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{info, warn};

use bubblewrap::{
    Logging, PROJECT_NAME, PROJECT_VERSION, PromptError, Settings,
    tui::{self, Chooser, TerminalDriver, TextInput},
};

/// Exit code used when the user cancels, as for SIGINT.
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbose
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Pick any number of options; selections are printed one per line
    Choose {
        /// Options to choose from
        #[arg(required = true)]
        options: Vec<String>,

        /// Options shown per page (overrides the settings file)
        #[arg(long)]
        page_size: Option<usize>,

        /// Cursor glyph (overrides the settings file)
        #[arg(long)]
        cursor: Option<String>,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Read a single line of text and print it
    Input {
        /// Label shown before the text
        #[arg(long, default_value = "> ")]
        prompt: String,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let file_name = format!("{PROJECT_NAME}.log");
    Logging::new()
        .with_file(file_name)
        .with_debug_mode(verbose)
        .start()
}

fn open_driver(timeout: Option<u64>) -> io::Result<TerminalDriver> {
    let driver = TerminalDriver::new()?;
    Ok(match timeout {
        Some(secs) => driver.with_timeout(Duration::from_secs(secs)),
        None => driver,
    })
}

fn choose(
    settings: &Settings,
    options: Vec<String>,
    page_size: Option<usize>,
    cursor: Option<String>,
    timeout: Option<u64>,
) -> Result<Vec<String>, PromptError> {
    let mut config = settings.chooser_config();
    if let Some(page_size) = page_size {
        config.page_size = page_size;
    }
    if let Some(cursor) = cursor {
        config.cursor = cursor;
    }

    let chooser = Chooser::new(options, config)?;
    let mut driver = open_driver(timeout)?;
    tui::run(chooser, &mut driver)
}

fn input(settings: &Settings, prompt: String, timeout: Option<u64>) -> Result<String, PromptError> {
    let text_input = TextInput::with_config(settings.input_config(prompt));
    let mut driver = open_driver(timeout)?;
    tui::run(text_input, &mut driver)
}

fn print_lines(lines: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = UserArgs::parse();

    init_logging(args.verbose)?;
    let settings = Settings::load().context("Unable to load settings")?;

    let result = match args.command {
        None => {
            println!("{PROJECT_NAME} {PROJECT_VERSION}");
            println!();
            println!("  Run `{PROJECT_NAME} choose <OPTION>...` to pick from a list, or");
            println!("  Run `{PROJECT_NAME} input` to read a line of text.");
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Choose {
            options,
            page_size,
            cursor,
            timeout,
        }) => choose(&settings, options, page_size, cursor, timeout),
        Some(Command::Input { prompt, timeout }) => {
            input(&settings, prompt, timeout).map(|value| vec![value])
        }
    };

    match result {
        Ok(lines) => {
            info!("prompt finished with {} line(s)", lines.len());
            print_lines(&lines)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(PromptError::Cancelled) => {
            warn!("user cancelled");
            eprintln!("{}", "[warn] user cancelled".yellow());
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
        Err(e) => Err(e).context("Prompt failed"),
    }
}
