mod config;
mod error;
mod repository;
mod storage;
mod task;
mod ui;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{AppConfig, Overrides};
use repository::TaskRepository;
use storage::Storage;
use ui::Console;

/// Interactive task tracker backed by a JSON file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Task file to use instead of the configured one (default: tasks.json)
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load(Overrides {
        file: cli.file,
        no_color: cli.no_color,
        is_terminal: io::stdout().is_terminal(),
    })?;

    println!("Task Tracker CLI");

    let storage = Storage::new(config.file);
    tracing::debug!(path = %storage.path().display(), "using task file");
    if let Err(err) = storage.ensure_exists() {
        println!("Error initializing file: {err}");
        return Ok(ExitCode::FAILURE);
    }

    let repo = TaskRepository::new(storage);
    let stdin = io::stdin();
    Console::new(stdin.lock(), io::stdout(), repo, config.color).run()?;
    Ok(ExitCode::SUCCESS)
}

// Opt-in through RUST_LOG; logs go to stderr so they never mix with prompts.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
