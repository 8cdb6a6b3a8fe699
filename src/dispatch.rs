//! Sink selection and per-sink failure policy.

use crate::config::{Config, EmailConfig};
use crate::sink::email;
use crate::sink::webhook::{self, WebhookError};

/// Subject used when `-s` is omitted or empty.
pub const DEFAULT_SUBJECT: &str = "Nota";

/// The captured input plus the subject it is sent under.
#[derive(Debug)]
pub struct Notification {
    pub subject: String,
    pub body: Vec<u8>,
}

impl Notification {
    pub fn new(subject: impl Into<String>, body: Vec<u8>) -> Self {
        let subject = subject.into();
        let subject = if subject.is_empty() {
            DEFAULT_SUBJECT.to_string()
        } else {
            subject
        };
        Self { subject, body }
    }
}

/// The delivery backend selected by the config's `type` field.
#[derive(Debug, PartialEq, Eq)]
pub enum Sink<'a> {
    /// `gmail`: plaintext email through the configured SMTP relay.
    Email(&'a EmailConfig),
    /// `discord`: JSON POST to the configured webhook URL.
    Webhook(&'a str),
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid type {0:?}, expected \"gmail\" or \"discord\"")]
    InvalidSinkType(String),
    #[error("webhook delivery failed")]
    Webhook(#[from] WebhookError),
}

impl<'a> Sink<'a> {
    /// Resolve the sink named by `config.sink_type`.
    pub fn from_config(config: &'a Config) -> Result<Self, DispatchError> {
        match config.sink_type.as_str() {
            "gmail" => Ok(Sink::Email(&config.email)),
            "discord" => Ok(Sink::Webhook(&config.webhook)),
            other => Err(DispatchError::InvalidSinkType(other.to_string())),
        }
    }

    /// The config `type` value that selects this sink.
    pub fn name(&self) -> &'static str {
        match self {
            Sink::Email(_) => "gmail",
            Sink::Webhook(_) => "discord",
        }
    }
}

/// Deliver `notification` through `sink`.
///
/// Email failures are logged and swallowed; webhook failures are returned.
pub fn dispatch(sink: &Sink<'_>, notification: &Notification) -> Result<(), DispatchError> {
    match sink {
        Sink::Email(config) => match email::send(config, notification) {
            Ok(()) => tracing::info!(to = %config.to, "email sent"),
            Err(e) => {
                let cause = std::error::Error::source(&e)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                tracing::error!(error = %e, %cause, "send email error");
            }
        },
        Sink::Webhook(url) => {
            webhook::send(url, notification)?;
            tracing::info!("webhook notification posted");
        }
    }
    Ok(())
}
