//! The notify pipeline behind the `nota` binary.

use std::io;
use std::path::Path;

use crate::capture;
use crate::config::Config;
use crate::dispatch::{self, Notification, Sink};
use crate::NotaError;

/// Execute one notification run against the real stdin/stdout.
///
/// The sink is resolved before stdin is touched, so a bad `type` fails
/// without echoing anything and without any network traffic.
pub fn run(subject: &str, config_path: Option<&Path>) -> Result<(), NotaError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => Config::default_path()?,
    };
    let config = Config::load(&path)?;
    let sink = Sink::from_config(&config)?;
    tracing::debug!(config = %path.display(), sink = sink.name(), "resolved sink");

    let body = capture::tee(io::stdin().lock(), io::stdout().lock()).map_err(NotaError::Input)?;

    let notification = Notification::new(subject, body);
    dispatch::dispatch(&sink, &notification)?;
    Ok(())
}
