//! Loop state — everything the poll loop carries from one iteration to the
//! next, with one method per transition.

use hwbot_common::config::TrackingPolicy;
use hwbot_common::error::AppError;
use hwbot_common::types::PollCursor;

use crate::classifier::{self, ErrorReport};
use crate::detector::{self, StatusChange, TrackedStatus};
use crate::health::RequestHealth;

#[derive(Debug, Clone, Default)]
pub struct LoopState {
    cursor: PollCursor,
    tracked: TrackedStatus,
    health: RequestHealth,
    policy: TrackingPolicy,
}

impl LoopState {
    pub fn new(policy: TrackingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn tracked(&self) -> &TrackedStatus {
        &self.tracked
    }

    pub fn health(&self) -> &RequestHealth {
        &self.health
    }

    pub fn policy(&self) -> TrackingPolicy {
        self.policy
    }

    /// Run the change detector against the tracked status.
    pub fn detect(&self, latest: Option<&str>) -> StatusChange {
        detector::detect(latest, &self.tracked)
    }

    /// Record the outcome of a delivery attempt for a changed status.
    ///
    /// Under [`TrackingPolicy::OnDetection`] the status is recorded whatever
    /// the outcome; under [`TrackingPolicy::OnDelivery`] only when the chat
    /// accepted the message, so a failed delivery is retried next poll.
    pub fn record_delivery(&mut self, message: String, delivered: bool) {
        match self.policy {
            TrackingPolicy::OnDetection => self.tracked.replace(message),
            TrackingPolicy::OnDelivery if delivered => self.tracked.replace(message),
            TrackingPolicy::OnDelivery => {
                tracing::debug!("Status left untracked until delivery succeeds");
            }
        }
    }

    /// Close a fully successful iteration: re-arm error notifications and
    /// move the cursor to the server-reported date.
    pub fn record_success(&mut self, current_date: Option<i64>) {
        self.health.record_success();
        self.cursor.advance(current_date);
    }

    /// Close a failed iteration. The cursor is left untouched.
    pub fn record_failure(&mut self, error: &AppError) -> ErrorReport {
        classifier::classify(error, &mut self.health)
    }
}
