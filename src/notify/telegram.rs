//! Telegram bot notification channel.

use std::time::Duration;

use super::{format_message, Notifier};
use crate::config::TelegramSettings;
use crate::engine::Classification;
use crate::error::{Error, Result};

/// Telegram Bot API base URL.
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Posts results to a Telegram chat through the Bot API.
pub struct TelegramNotifier {
    settings: TelegramSettings,
    api_url: String,
    client: reqwest::blocking::Client,
}

impl TelegramNotifier {
    /// Create a notifier for the configured bot and chat.
    pub fn new(settings: TelegramSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(settings, client))
    }

    /// Create a notifier that posts through an existing HTTP client.
    pub fn with_client(settings: TelegramSettings, client: reqwest::blocking::Client) -> Self {
        Self {
            settings,
            api_url: TELEGRAM_API_URL.to_string(),
            client,
        }
    }

    /// Use a different API base URL.
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// URL of the `sendMessage` method for this bot.
    pub fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.settings.bot_token)
    }
}

impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "Telegram"
    }

    fn send(&self, results: &[Classification]) -> Result<()> {
        let payload = serde_json::json!({
            "chat_id": self.settings.chat_id,
            "text": format_message(results),
        });

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Telegram(format!("{}: {}", status, body)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_url() {
        let notifier = TelegramNotifier::new(TelegramSettings {
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
        })
        .unwrap();
        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );

        let notifier = notifier.with_api_url("http://127.0.0.1:9000/");
        assert_eq!(
            notifier.send_message_url(),
            "http://127.0.0.1:9000/bot123:abc/sendMessage"
        );
    }
}
