//! Environment-based configuration.

use crate::error::{Error, Result};

/// Environment variable holding the subnet configuration text.
pub const SUBNETS_VAR: &str = "SUBNETS";

/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default geolocation API base URL.
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipinfo.io";

/// Settings read from the environment (and an optional `.env` file).
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Subnet configuration text, `name:cidr1;cidr2,...`
    pub subnets: String,
    pub email_sender: Option<String>,
    pub email_password: Option<String>,
    pub smtp_server: Option<String>,
    pub smtp_port: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub geolocation_url: Option<String>,
}

/// SMTP settings needed to send an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub sender: String,
    pub password: String,
    pub server: String,
    pub port: u16,
}

/// Bot credentials needed to post to Telegram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

impl Settings {
    /// Load settings, reading `.env` from the working directory first if present.
    ///
    /// Variables already set in the process environment take precedence
    /// over values in `.env`.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => log::debug!("No .env file found"),
            Err(e) => log::warn!("Failed to read .env file: {}", e),
        }
        Self::from_env()
    }

    /// Read settings from the process environment only.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a key lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            subnets: get(SUBNETS_VAR).unwrap_or_default(),
            email_sender: get("EMAIL_SENDER"),
            email_password: get("EMAIL_PASSWORD"),
            smtp_server: get("SMTP_SERVER"),
            smtp_port: get("SMTP_PORT"),
            telegram_bot_token: get("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: get("TELEGRAM_CHAT_ID"),
            geolocation_url: get("GEOLOCATION_URL"),
        }
    }

    /// Get the geolocation API base URL.
    pub fn geolocation_url(&self) -> &str {
        self.geolocation_url
            .as_deref()
            .unwrap_or(DEFAULT_GEOLOCATION_URL)
    }

    /// Get the SMTP settings, or an error naming the first missing variable.
    pub fn email(&self) -> Result<EmailSettings> {
        let sender = require(&self.email_sender, "EMAIL_SENDER")?;
        let password = require(&self.email_password, "EMAIL_PASSWORD")?;
        let server = require(&self.smtp_server, "SMTP_SERVER")?;
        let port = match self.smtp_port.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("SMTP_PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(EmailSettings {
            sender,
            password,
            server,
            port,
        })
    }

    /// Get the Telegram settings, or an error naming the first missing variable.
    pub fn telegram(&self) -> Result<TelegramSettings> {
        Ok(TelegramSettings {
            bot_token: require(&self.telegram_bot_token, "TELEGRAM_BOT_TOKEN")?,
            chat_id: require(&self.telegram_chat_id, "TELEGRAM_CHAT_ID")?,
        })
    }
}

fn require(value: &Option<String>, var: &str) -> Result<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .ok_or_else(|| Error::Config(format!("{} is not set", var)))
}
