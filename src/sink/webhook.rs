//! Chat webhook sink.

use std::time::Duration;

use serde::Serialize;

use crate::dispatch::Notification;

/// Messages this many characters or longer (after trimming) get truncated.
pub const MAX_CONTENT_CHARS: usize = 2000;
/// Characters kept from an overlong message.
pub const TRUNCATED_CHARS: usize = 1700;
pub const TRUNCATION_SUFFIX: &str = "\n... NOT FULL MESSAGE";
/// Posted when the input is empty or whitespace only.
pub const EMPTY_PLACEHOLDER: &str = "DONE w/o results";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON body accepted by chat webhooks (Discord-compatible).
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WebhookPayload<'a> {
    pub username: &'a str,
    pub content: String,
}

impl<'a> WebhookPayload<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self {
            username: &notification.subject,
            content: prepare_content(&notification.body),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("POST to {url:?} failed")]
    Request {
        url: String,
        source: reqwest::Error,
    },
}

/// Trim the input, truncate overlong text, and substitute the placeholder for
/// empty input. Lengths are counted in characters, not bytes.
pub fn prepare_content(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    if trimmed.chars().count() >= MAX_CONTENT_CHARS {
        let head: String = trimmed.chars().take(TRUNCATED_CHARS).collect();
        return format!("{head}{TRUNCATION_SUFFIX}");
    }

    trimmed.to_string()
}

/// POST the notification to `url`.
///
/// Only transport failures are errors. A non-success status is logged and
/// otherwise ignored.
pub fn send(url: &str, notification: &Notification) -> Result<(), WebhookError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(WebhookError::Client)?;

    let payload = WebhookPayload::new(notification);
    let response = client
        .post(url)
        .json(&payload)
        .send()
        .map_err(|source| WebhookError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, "webhook responded with non-success status");
    }
    Ok(())
}
