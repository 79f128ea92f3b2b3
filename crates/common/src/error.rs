use thiserror::Error;

/// Common error types used across the application.
///
/// Every variant except [`AppError::ConfigMissing`] and
/// [`AppError::ConfigInvalid`] is recoverable: the poll loop catches it at the
/// iteration boundary and keeps running. The `Display` text of a variant is the
/// operator-facing diagnostic that ends up in the log and in the chat.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Отсутствует обязательная переменная окружения: '{0}'")]
    ConfigMissing(String),

    #[error("Некорректное значение переменной окружения '{name}': {reason}")]
    ConfigInvalid { name: String, reason: String },

    #[error("Сбой в работе программы: Запрос к эндпоинту {endpoint} вызвал ошибку {cause}")]
    TransportFailure { endpoint: String, cause: String },

    #[error("{}", describe_status(.endpoint, *.code))]
    BadStatusCode { endpoint: String, code: u16 },

    #[error("Сбой в работе программы: Отсутствует ожидаемый ключ '{key}' в {object}")]
    MissingField { key: String, object: String },

    #[error("Сбой в работе программы: Неожиданный статус домашней работы '{0}'")]
    UnrecognizedVerdict(String),

    #[error("Сбой в работе программы: Неожиданный тип данных {value}, ожидаемый тип: {expected}")]
    MalformedResponse { value: String, expected: String },

    #[error("Сбой в работе программы: {0}")]
    Internal(String),
}

/// Payload-free tag of an [`AppError`], for exhaustive matching and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigMissing,
    ConfigInvalid,
    TransportFailure,
    BadStatusCode,
    MissingField,
    UnrecognizedVerdict,
    MalformedResponse,
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConfigMissing => write!(f, "config_missing"),
            ErrorKind::ConfigInvalid => write!(f, "config_invalid"),
            ErrorKind::TransportFailure => write!(f, "transport_failure"),
            ErrorKind::BadStatusCode => write!(f, "bad_status_code"),
            ErrorKind::MissingField => write!(f, "missing_field"),
            ErrorKind::UnrecognizedVerdict => write!(f, "unrecognized_verdict"),
            ErrorKind::MalformedResponse => write!(f, "malformed_response"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ConfigMissing(_) => ErrorKind::ConfigMissing,
            AppError::ConfigInvalid { .. } => ErrorKind::ConfigInvalid,
            AppError::TransportFailure { .. } => ErrorKind::TransportFailure,
            AppError::BadStatusCode { .. } => ErrorKind::BadStatusCode,
            AppError::MissingField { .. } => ErrorKind::MissingField,
            AppError::UnrecognizedVerdict(_) => ErrorKind::UnrecognizedVerdict,
            AppError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Configuration errors halt the process before the poll loop starts.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::ConfigMissing(_) | AppError::ConfigInvalid { .. }
        )
    }

    pub fn missing_field(key: impl Into<String>, object: impl Into<String>) -> Self {
        AppError::MissingField {
            key: key.into(),
            object: object.into(),
        }
    }

    pub fn malformed(value: impl std::fmt::Display, expected: impl Into<String>) -> Self {
        AppError::MalformedResponse {
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

/// Render a non-success HTTP status into a diagnostic.
///
/// 400, 401 and 404 carry a specific explanation; any other code falls back
/// to a generic message.
fn describe_status(endpoint: &str, code: u16) -> String {
    match code {
        404 => format!(
            "Сбой в работе программы: Эндпоинт {endpoint} недоступен. Код ответа API: 404"
        ),
        401 => format!(
            "Сбой в работе программы: При запросе к эндпоинту {endpoint} \
             учетные данные не были предоставлены. Код ответа API: 401"
        ),
        400 => format!(
            "Сбой в работе программы: При запросе к эндпоинту {endpoint} \
             дата предоставлена в неверном формате. Код ответа API: 400"
        ),
        other => format!(
            "Сбой в работе программы: Эндпоинт {endpoint} вернул код {other}"
        ),
    }
}
