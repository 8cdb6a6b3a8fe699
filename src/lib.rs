//! Echo standard input and forward it as a notification to an email relay or a chat webhook.

pub mod capture;
pub mod config;
pub mod dispatch;
pub mod sink;

pub(crate) mod cli;

use std::path::Path;

use crate::config::ConfigError;
use crate::dispatch::DispatchError;

/// Fatal errors. Anything that reaches `main` as a `NotaError` exits non-zero.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum NotaError {
    #[error("failed to load configuration")]
    #[diagnostic(
        code(nota::config),
        help("create ~/.nota.json or pass --config <PATH>")
    )]
    Config(#[from] ConfigError),

    #[error("failed to relay standard input")]
    #[diagnostic(code(nota::input))]
    Input(#[source] std::io::Error),

    #[error("failed to dispatch notification")]
    #[diagnostic(code(nota::dispatch))]
    Dispatch(#[from] DispatchError),
}

/// Run the whole pipeline: load config, resolve the sink, tee stdin to stdout,
/// then deliver the captured input.
///
/// This is the binary entry point. It bridges `main.rs` to the library without
/// exposing `cli` internals; library callers should use [`capture::tee`],
/// [`config::Config`] and [`dispatch::dispatch`] directly.
pub fn run(subject: &str, config_path: Option<&Path>) -> Result<(), NotaError> {
    cli::notify::run(subject, config_path)
}
