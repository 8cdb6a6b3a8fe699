//! SMTP email sink.

use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{SmtpTransport, Transport};

use crate::config::EmailConfig;
use crate::dispatch::Notification;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("invalid {field} address {value:?}")]
    Address {
        field: &'static str,
        value: String,
        source: AddressError,
    },
    #[error("failed to build email")]
    Build(#[from] lettre::error::Error),
    #[error("SMTP delivery via {relay} failed")]
    Smtp {
        relay: String,
        source: lettre::transport::smtp::Error,
    },
}

/// Compose a plaintext message whose body is the captured input.
pub fn build_message(
    config: &EmailConfig,
    notification: &Notification,
) -> Result<Message, EmailError> {
    let body = String::from_utf8_lossy(&notification.body).into_owned();
    let message = Message::builder()
        .from(mailbox("from", &config.from)?)
        .to(mailbox("to", &config.to)?)
        .subject(notification.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(body)?;
    Ok(message)
}

/// Send the notification through the configured relay.
///
/// The session upgrades with STARTTLS but does NOT verify the server
/// certificate, and authenticates with PLAIN using the from-address.
pub fn send(config: &EmailConfig, notification: &Notification) -> Result<(), EmailError> {
    let message = build_message(config, notification)?;
    let relay = format!("{}:{}", config.host, config.port);
    let smtp_err = |source: lettre::transport::smtp::Error| EmailError::Smtp {
        relay: relay.clone(),
        source,
    };

    let tls = TlsParameters::builder(config.host.clone())
        .dangerous_accept_invalid_certs(true)
        .build()
        .map_err(smtp_err)?;

    let mailer = SmtpTransport::builder_dangerous(config.host.as_str())
        .port(config.port)
        .tls(Tls::Required(tls))
        .credentials(Credentials::new(config.from.clone(), config.password.clone()))
        .authentication(vec![Mechanism::Plain])
        .build();

    mailer.send(&message).map_err(smtp_err)?;
    Ok(())
}

fn mailbox(field: &'static str, value: &str) -> Result<Mailbox, EmailError> {
    value.parse().map_err(|source| EmailError::Address {
        field,
        value: value.to_string(),
        source,
    })
}
