//! Alert delivery channels.
//!
//! A [`Notifier`] delivers a formatted alert message to an external
//! endpoint. The production channel is Telegram
//! ([`channels::telegram::TelegramNotifier`]); dry-run mode substitutes
//! [`channels::log::LogNotifier`], which logs the would-be message
//! instead of sending it.

pub mod channels;
pub mod error;


use async_trait::async_trait;
use error::NotifyError;

/// A notification delivery channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `text` through this channel.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint rejects the message, fails the
    /// identity check, or cannot be reached within the configured timeout.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;

    /// Returns the channel name (e.g., `"telegram"`), used for logging.
    fn name(&self) -> &str;
}
