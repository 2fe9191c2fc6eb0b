//! Result notifications over email and Telegram.
//!
//! Notifiers consume a finished batch of results. They are never invoked by
//! the classification engine itself.

mod email;
mod telegram;

pub use email::{EmailNotifier, EMAIL_SUBJECT};
pub use telegram::{TelegramNotifier, TELEGRAM_API_URL};

use crate::engine::Classification;
use crate::error::Result;

/// A channel that can deliver a batch of results.
pub trait Notifier {
    /// Short channel name for logging.
    fn name(&self) -> &'static str;

    /// Deliver the results.
    fn send(&self, results: &[Classification]) -> Result<()>;
}

/// Render results as the plain-text notification body.
pub fn format_message(results: &[Classification]) -> String {
    let mut message = String::from("Here are the results of your subnet search:\n\n");
    let lines: Vec<String> = results
        .iter()
        .map(|r| format!("{} is in the subnets: {}", r.ip, r.group().unwrap_or("None")))
        .collect();
    message.push_str(&lines.join("\n"));
    message
}

/// Send through every notifier, logging each outcome.
///
/// Returns the number of notifiers that succeeded. A failing channel does
/// not stop the others.
pub fn notify_all(notifiers: &[Box<dyn Notifier>], results: &[Classification]) -> usize {
    let mut sent = 0;
    for notifier in notifiers {
        match notifier.send(results) {
            Ok(()) => {
                log::info!("{} notification sent successfully.", notifier.name());
                sent += 1;
            }
            Err(e) => log::error!("Failed to send {} notification: {}", notifier.name(), e),
        }
    }
    sent
}
