//! Error classifier — turns any iteration failure into an operator message.
//!
//! The message text comes from the `Display` of [`AppError`]; the classifier
//! pairs it with the error kind and the edge-triggered "should notify"
//! decision taken by [`RequestHealth`].

use hwbot_common::error::{AppError, ErrorKind};

use crate::health::RequestHealth;

/// A classified failure, ready to be logged and possibly sent to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    /// Whether this failure is the leading edge and must reach the chat.
    pub notify: bool,
}

/// Map a failure to its diagnostic without touching any state.
pub fn describe(error: &AppError) -> (ErrorKind, String) {
    (error.kind(), error.to_string())
}

/// Classify a failure and consult (and update) the request health.
pub fn classify(error: &AppError, health: &mut RequestHealth) -> ErrorReport {
    let (kind, message) = describe(error);
    let notify = health.record_failure();
    ErrorReport {
        kind,
        message,
        notify,
    }
}
