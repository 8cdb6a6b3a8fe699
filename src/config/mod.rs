//! Per-user JSON configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

/// File name of the per-user config, resolved against the home directory.
pub const CONFIG_FILE_NAME: &str = ".nota.json";

/// Default SMTP relay used by the `gmail` sink.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Top-level configuration loaded from `~/.nota.json`.
///
/// `type` stays a raw string here; [`crate::dispatch::Sink::from_config`]
/// turns it into a sink and rejects unknown values. Sink-specific sections
/// default to empty so a missing field only surfaces when that sink runs.
/// Keys also match in title case (`"Type"`, `"Email"`, ...), `null` reads as
/// the default, and unknown fields are silently ignored.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(rename = "type", alias = "Type", default, deserialize_with = "null_as_default")]
    pub sink_type: String,
    #[serde(alias = "Webhook", default, deserialize_with = "null_as_default")]
    pub webhook: String,
    #[serde(alias = "Email", default, deserialize_with = "null_as_default")]
    pub email: EmailConfig,
}

/// Credentials and addressing for the email sink.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct EmailConfig {
    #[serde(alias = "From", default, deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(alias = "Password", default, deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(alias = "To", default, deserialize_with = "null_as_default")]
    pub to: String,
    #[serde(alias = "Host", default = "default_smtp_host", deserialize_with = "nullable_host")]
    pub host: String,
    #[serde(alias = "Port", default = "default_smtp_port", deserialize_with = "nullable_port")]
    pub port: u16,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: String::new(),
            password: String::new(),
            to: String::new(),
            host: default_smtp_host(),
            port: default_smtp_port(),
        }
    }
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_host<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_smtp_host))
}

fn nullable_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    Ok(Option::<u16>::deserialize(deserializer)?.unwrap_or_else(default_smtp_port))
}

/// Errors that can occur when locating, reading, or parsing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    HomeDirNotFound,
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config from {path}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON")]
    ParseError(#[from] serde_json::Error),
}

impl Config {
    /// `<home>/.nota.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::HomeDirNotFound)
    }

    /// Load a config from a JSON file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a JSON string into a Config.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}
