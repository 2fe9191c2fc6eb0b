//! Email notification channel.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::{format_message, Notifier};
use crate::config::EmailSettings;
use crate::engine::Classification;
use crate::error::{Error, Result};

/// Subject line of result emails.
pub const EMAIL_SUBJECT: &str = "Subnet Searcher Results";

/// Sends results as a plain-text email over an authenticated SMTP STARTTLS relay.
pub struct EmailNotifier {
    settings: EmailSettings,
    recipient: String,
}

impl EmailNotifier {
    /// Create a notifier that mails `recipient` using `settings`.
    pub fn new(settings: EmailSettings, recipient: impl Into<String>) -> Self {
        Self {
            settings,
            recipient: recipient.into(),
        }
    }

    /// Build the email for a batch of results.
    pub fn build_message(&self, results: &[Classification]) -> Result<Message> {
        let from = parse_mailbox(&self.settings.sender)?;
        let to = parse_mailbox(&self.recipient)?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(EMAIL_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(format_message(results))
            .map_err(|e| Error::Email(e.to_string()))
    }

    fn transport(&self) -> Result<SmtpTransport> {
        let creds = Credentials::new(
            self.settings.sender.clone(),
            self.settings.password.clone(),
        );

        let transport = SmtpTransport::starttls_relay(&self.settings.server)
            .map_err(|e| Error::Email(e.to_string()))?
            .credentials(creds)
            .port(self.settings.port)
            .build();

        Ok(transport)
    }
}

impl Notifier for EmailNotifier {
    fn name(&self) -> &'static str {
        "Email"
    }

    fn send(&self, results: &[Classification]) -> Result<()> {
        let message = self.build_message(results)?;
        self.transport()?
            .send(&message)
            .map_err(|e| Error::Email(e.to_string()))?;
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| Error::Email(format!("invalid address '{}': {}", address, e)))
}
