use serde_json::Value;

use hwbot_common::error::AppError;

use crate::preview;

/// Object description used in diagnostics about the top-level payload.
pub const RESPONSE_OBJECT: &str = "ответе API";

/// What the top-level payload is required to carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseContract {
    /// Reject responses without a `current_date` key.
    pub require_current_date: bool,
}

/// A payload that passed shape validation, borrowing from the raw response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedResponse<'a> {
    /// Homework records, most recent first, exactly as returned.
    pub homeworks: &'a [Value],
    /// Server-reported cursor for the next request.
    pub current_date: Option<i64>,
}

/// Check a decoded API response against the expected shape.
///
/// - not an object → `MalformedResponse`
/// - no `homeworks` key → `MissingField`
/// - `homeworks` not an array → `MalformedResponse`
/// - `current_date` present but not a whole number → `MalformedResponse`
///   (`1000` and `1000.0` are both accepted)
/// - `current_date` absent while the contract requires it → `MissingField`
///
/// An empty `homeworks` array is valid.
pub fn validate_response(
    response: &Value,
    contract: ResponseContract,
) -> Result<ValidatedResponse<'_>, AppError> {
    let object = response
        .as_object()
        .ok_or_else(|| AppError::malformed(preview(response), "объект"))?;

    let homeworks = match object.get("homeworks") {
        None | Some(Value::Null) => {
            return Err(AppError::missing_field("homeworks", RESPONSE_OBJECT));
        }
        Some(Value::Array(items)) => items.as_slice(),
        Some(other) => return Err(AppError::malformed(preview(other), "список")),
    };

    let current_date = match object.get("current_date") {
        None | Some(Value::Null) if contract.require_current_date => {
            return Err(AppError::missing_field("current_date", RESPONSE_OBJECT));
        }
        None | Some(Value::Null) => None,
        Some(value) => Some(
            whole_seconds(value)
                .ok_or_else(|| AppError::malformed(preview(value), "целое число"))?,
        ),
    };

    Ok(ValidatedResponse {
        homeworks,
        current_date,
    })
}

/// Integer timestamp, also accepting floats with no fractional part.
fn whole_seconds(value: &Value) -> Option<i64> {
    if let Some(secs) = value.as_i64() {
        return Some(secs);
    }
    let secs = value.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if secs.fract() == 0.0 && secs >= i64::MIN as f64 && secs < i64::MAX as f64 {
        Some(secs as i64)
    } else {
        None
    }
}
