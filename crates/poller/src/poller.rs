use std::time::Duration;

use serde_json::Value;

use hwbot_common::config::TrackingPolicy;
use hwbot_common::error::AppError;
use hwbot_decoders::{HomeworkStatus, ResponseContract, ResponseDecoder, ReviewSnapshot};
use hwbot_engine::{ErrorReport, LoopState, StatusChange};
use hwbot_notifier::{Notifier, deliver};

use crate::client::ReviewSource;

/// What a single iteration of the poll loop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationOutcome {
    /// A new status was detected and handed to the notifier.
    Notified { message: String, delivered: bool },
    /// The poll succeeded but there was nothing new to report.
    Unchanged,
    /// The iteration failed; the report says whether the chat was told.
    Failed(ErrorReport),
}

/// Status poller that periodically asks the review API for changes and
/// forwards them to the chat.
pub struct StatusPoller<S, N> {
    source: S,
    notifier: N,
    decoder: ResponseDecoder,
    state: LoopState,
    retry_period: Duration,
}

impl<S: ReviewSource, N: Notifier> StatusPoller<S, N> {
    pub fn new(source: S, notifier: N, retry_period: Duration) -> Self {
        Self {
            source,
            notifier,
            decoder: ResponseDecoder::default(),
            state: LoopState::default(),
            retry_period,
        }
    }

    pub fn with_contract(mut self, contract: ResponseContract) -> Self {
        self.decoder = ResponseDecoder::new(contract);
        self
    }

    pub fn with_tracking_policy(mut self, policy: TrackingPolicy) -> Self {
        self.state = LoopState::new(policy);
        self
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Start the polling loop. Runs until the task is cancelled.
    ///
    /// The pause between iterations is a plain `tokio::time::sleep`, so
    /// dropping this future (e.g. from a `select!`) stops the loop at once.
    pub async fn run(&mut self) {
        tracing::info!(
            endpoint = self.source.endpoint(),
            retry_period_secs = self.retry_period.as_secs(),
            tracking_policy = ?self.state.policy(),
            "Status poller started"
        );

        loop {
            self.poll_once().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Run one fetch → validate → extract → detect → notify iteration.
    pub async fn poll_once(&mut self) -> IterationOutcome {
        match self.fetch_snapshot().await {
            Ok(snapshot) => self.handle_snapshot(snapshot).await,
            Err(e) => self.handle_failure(&e).await,
        }
    }

    async fn fetch_snapshot(&self) -> Result<ReviewSnapshot, AppError> {
        let payload: Value = self.source.fetch(self.state.cursor()).await?;
        self.decoder.decode(&payload)
    }

    async fn handle_snapshot(&mut self, snapshot: ReviewSnapshot) -> IterationOutcome {
        let latest = snapshot.latest.as_ref().map(HomeworkStatus::message);

        let outcome = match self.state.detect(latest.as_deref()) {
            StatusChange::Unchanged => {
                tracing::debug!(
                    cursor = %self.state.cursor(),
                    homeworks = snapshot.homework_count,
                    "No new statuses"
                );
                IterationOutcome::Unchanged
            }
            StatusChange::Changed(message) => {
                if let Some(status) = &snapshot.latest {
                    tracing::info!(
                        homework = %status.homework_name,
                        verdict = %status.verdict,
                        "Homework status changed"
                    );
                }
                let delivered = deliver(&self.notifier, &message).await;
                self.state.record_delivery(message.clone(), delivered);
                IterationOutcome::Notified { message, delivered }
            }
        };

        self.state.record_success(snapshot.current_date);
        outcome
    }

    async fn handle_failure(&mut self, error: &AppError) -> IterationOutcome {
        let report = self.state.record_failure(error);

        tracing::error!(
            kind = %report.kind,
            consecutive_failures = self.state.health().consecutive_failures(),
            notify = report.notify,
            "{}",
            report.message
        );

        if report.notify {
            deliver(&self.notifier, &report.message).await;
        }

        IterationOutcome::Failed(report)
    }
}
