pub mod homework;
pub mod response;

#[cfg(test)]
mod decoder_tests;

use serde_json::Value;

use hwbot_common::error::AppError;

pub use homework::{HomeworkStatus, parse_status};
pub use response::{ResponseContract, ValidatedResponse, validate_response};

/// Longest rendering of an offending value kept in a diagnostic.
const PREVIEW_CHARS: usize = 200;

/// What one poll told us about the tracked homework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSnapshot {
    /// Status of the most recent homework, `None` when the batch was empty.
    pub latest: Option<HomeworkStatus>,
    /// Number of records in the batch (only the first one is inspected).
    pub homework_count: usize,
    /// Server-reported cursor for the next request.
    pub current_date: Option<i64>,
}

/// Turns a raw review API payload into a [`ReviewSnapshot`].
///
/// Only the first record is parsed: the API returns homeworks most recent
/// first, so older entries of the same batch are ignored.
#[derive(Debug, Clone, Default)]
pub struct ResponseDecoder {
    contract: ResponseContract,
}

impl ResponseDecoder {
    pub fn new(contract: ResponseContract) -> Self {
        Self { contract }
    }

    pub fn decode(&self, response: &Value) -> Result<ReviewSnapshot, AppError> {
        let validated = validate_response(response, self.contract)?;

        let latest = validated.homeworks.first().map(parse_status).transpose()?;

        if validated.homeworks.len() > 1 {
            tracing::debug!(
                ignored = validated.homeworks.len() - 1,
                "Only the most recent homework is tracked"
            );
        }

        Ok(ReviewSnapshot {
            latest,
            homework_count: validated.homeworks.len(),
            current_date: validated.current_date,
        })
    }
}

/// Compact JSON rendering of a value for error messages.
pub(crate) fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() <= PREVIEW_CHARS {
        return rendered;
    }
    let mut short: String = rendered.chars().take(PREVIEW_CHARS).collect();
    short.push('…');
    short
}
