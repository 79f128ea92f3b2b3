use serde_json::Value;

use hwbot_common::error::AppError;
use hwbot_common::types::Verdict;

use crate::preview;

/// Object description used in diagnostics about a single homework record.
pub const HOMEWORK_OBJECT: &str = "информации о домашней работе";

/// Name and verdict of one homework, as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkStatus {
    pub homework_name: String,
    pub verdict: Verdict,
}

impl HomeworkStatus {
    /// Chat message for this status. Also used as the change-detection key.
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.verdict.text()
        )
    }
}

/// Pull the name and verdict out of one homework record.
pub fn parse_status(homework: &Value) -> Result<HomeworkStatus, AppError> {
    let record = homework
        .as_object()
        .ok_or_else(|| AppError::malformed(preview(homework), "объект"))?;

    let field = |key: &str| -> Result<String, AppError> {
        match record.get(key) {
            None | Some(Value::Null) => Err(AppError::missing_field(key, HOMEWORK_OBJECT)),
            Some(Value::String(s)) if s.is_empty() => {
                Err(AppError::missing_field(key, HOMEWORK_OBJECT))
            }
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(AppError::malformed(preview(other), "строка")),
        }
    };

    let homework_name = field("homework_name")?;
    let verdict = field("status")?.parse::<Verdict>()?;

    Ok(HomeworkStatus {
        homework_name,
        verdict,
    })
}
