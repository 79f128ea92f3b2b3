use crate::error::AppError;

/// Default review API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default pause between two polls, in seconds.
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

/// Default HTTP timeout for a single review API request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Required secrets. Checked in this order at startup.
pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// The three secrets the bot cannot run without.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth token for the review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Destination chat for notifications
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// When the tracked status is overwritten after a change is detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackingPolicy {
    /// Record the new status as soon as it is detected, even if delivery fails.
    #[default]
    OnDetection,
    /// Record the new status only once the chat accepted the message.
    OnDelivery,
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,

    /// Review API URL
    pub endpoint: String,

    /// Pause between polls in seconds (default: 600)
    pub retry_period_secs: u64,

    /// Per-request HTTP timeout in seconds (default: 30)
    pub request_timeout_secs: u64,

    /// Treat a response without `current_date` as malformed
    pub require_current_date: bool,

    pub tracking_policy: TrackingPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as missing. When several secrets are absent the
    /// error lists all of them, comma separated, in [`REQUIRED_VARS`] order.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| non_empty(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::ConfigMissing(missing.join(", ")));
        }

        let required = |key: &str| non_empty(key).ok_or_else(|| AppError::ConfigMissing(key.into()));

        Ok(Self {
            credentials: Credentials {
                practicum_token: required("PRACTICUM_TOKEN")?,
                telegram_token: required("TELEGRAM_TOKEN")?,
                telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            },
            endpoint: non_empty("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_period_secs: parse_positive_or(
                "RETRY_PERIOD_SECS",
                &lookup,
                DEFAULT_RETRY_PERIOD_SECS,
            )?,
            request_timeout_secs: parse_positive_or(
                "REQUEST_TIMEOUT_SECS",
                &lookup,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            require_current_date: parse_or("REQUIRE_CURRENT_DATE", &lookup, false)?,
            tracking_policy: if parse_or("TRACK_STATUS_ON_DELIVERY", &lookup, false)? {
                TrackingPolicy::OnDelivery
            } else {
                TrackingPolicy::OnDetection
            },
        })
    }
}

fn parse_or<T, F>(name: &str, lookup: &F, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| AppError::ConfigInvalid {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Like [`parse_or`], for durations: zero would make the poll loop spin
/// without pausing, or every request time out immediately.
fn parse_positive_or<F>(name: &str, lookup: &F, default: u64) -> Result<u64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_or(name, lookup, default)? {
        0 => Err(AppError::ConfigInvalid {
            name: name.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        secs => Ok(secs),
    }
}
