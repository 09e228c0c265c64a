//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve data file, relay endpoint, logging and optional session
//!   credentials from `BILLGUARD_*` variables.
//! - Load a local `.env` file when present.
//!
//! # Invariants
//! - Blank values fall back to defaults.
//! - The relay credential never appears in `Debug` output.

use crate::logging::default_log_level;
use crate::notify::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "bills_data.csv";

pub const ENV_DATA_FILE: &str = "BILLGUARD_DATA_FILE";
pub const ENV_SMTP_HOST: &str = "BILLGUARD_SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "BILLGUARD_SMTP_PORT";
pub const ENV_LOG_LEVEL: &str = "BILLGUARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BILLGUARD_LOG_DIR";
pub const ENV_EMAIL: &str = "BILLGUARD_EMAIL";
pub const ENV_APP_PASSWORD: &str = "BILLGUARD_APP_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
    EnvFile(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort(value) => {
                write!(f, "{ENV_SMTP_PORT} must be a port number, got `{value}`")
            }
            Self::EnvFile(detail) => write!(f, "failed to load .env file: {detail}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub log_level: String,
    /// File logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub email: Option<String>,
    pub app_password: Option<String>,
}

impl Debug for AppConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("data_file", &self.data_file)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .field("email", &self.email)
            .field(
                "app_password",
                &self.app_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ConfigError::EnvFile(err.to_string()));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let smtp_port = match value(ENV_SMTP_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or(ConfigError::InvalidPort(raw))?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            data_file: PathBuf::from(
                value(ENV_DATA_FILE).unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            ),
            smtp_host: value(ENV_SMTP_HOST).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            log_level: value(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: value(ENV_LOG_DIR).map(PathBuf::from),
            email: value(ENV_EMAIL),
            app_password: value(ENV_APP_PASSWORD),
        })
    }
}
