use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use hwbot_common::error::AppError;
use hwbot_common::types::PollCursor;

/// Anything that can answer "what changed since `cursor`" with a raw payload.
pub trait ReviewSource: Send + Sync {
    fn fetch(&self, cursor: PollCursor) -> impl Future<Output = Result<Value, AppError>> + Send;

    /// Endpoint description for logs.
    fn endpoint(&self) -> &str;
}

/// HTTP client for the homework status endpoint.
#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ReviewSource for PracticumClient {
    async fn fetch(&self, cursor: PollCursor) -> Result<Value, AppError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            from_date = cursor.from_date(),
            "Requesting homework statuses"
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor.from_date())])
            .send()
            .await
            .map_err(|e| AppError::TransportFailure {
                endpoint: self.endpoint.clone(),
                cause: e.without_url().to_string(),
            })?;

        check_status(&self.endpoint, response.status().as_u16())?;

        response.json::<Value>().await.map_err(|e| {
            AppError::Internal(format!(
                "некорректный JSON в ответе API: {}",
                e.without_url()
            ))
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Any non-2xx status is a failure of the whole iteration.
pub fn check_status(endpoint: &str, status: u16) -> Result<(), AppError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(AppError::BadStatusCode {
        endpoint: endpoint.to_string(),
        code: status,
    })
}
