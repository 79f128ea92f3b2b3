//! Chat notification delivery.
//!
//! Delivery is best-effort: [`deliver`] logs the outcome and reports it as a
//! boolean, it never propagates an error into the poll loop and never retries.

pub mod telegram;

use std::future::Future;

use thiserror::Error;

pub use telegram::TelegramNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat API returned status {status}: {description}")]
    Status { status: u16, description: String },

    #[error("Chat API rejected message: {0}")]
    Rejected(String),
}

/// A destination for human-readable notifications.
pub trait Notifier: Send + Sync {
    /// Send one text message to the configured destination.
    fn send_message(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Send `text`, logging the outcome. Returns whether the chat accepted it.
pub async fn deliver<N: Notifier>(notifier: &N, text: &str) -> bool {
    match notifier.send_message(text).await {
        Ok(()) => {
            tracing::debug!(text, "Notification sent");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, text, "Failed to send notification");
            false
        }
    }
}
