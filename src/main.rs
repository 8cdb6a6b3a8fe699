//! `nota` binary: argument parsing and logging setup.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Echo stdin to stdout and forward it as a notification.
#[derive(Debug, Parser)]
#[command(name = "nota", version, about)]
struct Cli {
    /// Subject of the notification (webhook username / email subject)
    #[arg(short, long, default_value = nota::dispatch::DEFAULT_SUBJECT)]
    subject: String,

    /// Path to the JSON config file (defaults to ~/.nota.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> miette::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    nota::run(&cli.subject, cli.config.as_deref())?;
    Ok(())
}

/// Logs go to stderr: stdout carries the echoed input and nothing else.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
