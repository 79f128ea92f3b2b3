//! Change detector — decides whether a freshly extracted status is news.
//!
//! The status message itself is the dedup key: two polls that produce the
//! same (homework name, verdict) pair yield the same string and must not
//! notify twice in a row.

/// Last status message handed to the notifier. Empty until the first change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedStatus(String);

impl TrackedStatus {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn replace(&mut self, message: String) {
        self.0 = message;
    }
}

/// Result of comparing a new status against the tracked one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    Unchanged,
    Changed(String),
}

/// Compare the new status message with the tracked one.
///
/// An empty batch is passed as `None` and never counts as a change.
pub fn detect(latest: Option<&str>, tracked: &TrackedStatus) -> StatusChange {
    let latest = latest.unwrap_or_default();
    if latest == tracked.as_str() || latest.is_empty() {
        return StatusChange::Unchanged;
    }
    StatusChange::Changed(latest.to_string())
}
