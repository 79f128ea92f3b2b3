use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::AppError;

/// Review outcome code reported by the homework API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Fixed human-readable text sent to the chat for this verdict.
    pub fn text(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Verdict {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(AppError::UnrecognizedVerdict(other.to_string())),
        }
    }
}

/// Lower bound (seconds since epoch) of the next fetch window.
///
/// Zero asks the API for the full history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn new(from_date: i64) -> Self {
        Self(from_date)
    }

    pub fn from_date(&self) -> i64 {
        self.0
    }

    /// Move the cursor to the server-reported date, if there is one.
    pub fn advance(&mut self, current_date: Option<i64>) {
        if let Some(date) = current_date {
            self.0 = date;
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.0, 0).single()
    }
}

impl std::fmt::Display for PollCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_datetime() {
            Some(dt) => write!(f, "{} ({})", self.0, dt.to_rfc3339()),
            None => write!(f, "{}", self.0),
        }
    }
}
