//! Request health — edge trigger for error notifications.
//!
//! A persisting failure (the API being down for an hour, say) would otherwise
//! produce one chat message per poll. Only the transition from healthy to
//! failing is reported; the next successful poll re-arms the trigger.
//!
//! State lives in memory only. A restart re-arms the trigger.

/// "Was the previous request ok" flag, plus a failure streak for logging.
#[derive(Debug, Clone)]
pub struct RequestHealth {
    previous_ok: bool,
    consecutive_failures: u32,
}

impl RequestHealth {
    pub fn new() -> Self {
        Self {
            previous_ok: true,
            consecutive_failures: 0,
        }
    }

    /// Record a failed iteration.
    ///
    /// Returns `true` only on the failing edge, i.e. when the previous
    /// iteration succeeded (or this is the first one).
    pub fn record_failure(&mut self) -> bool {
        let notify = self.previous_ok;
        self.previous_ok = false;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);

        if !notify {
            tracing::debug!(
                consecutive_failures = self.consecutive_failures,
                "Error notification suppressed — failure persists"
            );
        }

        notify
    }

    /// Record a fully successful iteration, re-arming the trigger.
    pub fn record_success(&mut self) {
        if !self.previous_ok {
            tracing::info!(
                failures = self.consecutive_failures,
                "Review API requests recovered"
            );
        }
        self.previous_ok = true;
        self.consecutive_failures = 0;
    }

    pub fn is_ok(&self) -> bool {
        self.previous_ok
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}

impl Default for RequestHealth {
    fn default() -> Self {
        Self::new()
    }
}
