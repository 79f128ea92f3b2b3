use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Notifier, NotifyError};

/// Public Telegram Bot API base URL.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Timeout for a single `sendMessage` call.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends notifications through the Telegram Bot API `sendMessage` method.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, NotifyError> {
        Self::with_api_base(TELEGRAM_API_BASE, token, chat_id)
    }

    /// Point the notifier at a different Bot API server (self-hosted, or a
    /// local stub in tests).
    pub fn with_api_base(
        api_base: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            // Drop the URL from the error: it embeds the bot token
            .map_err(|e| NotifyError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Http(e.without_url()))?;
        check_reply(status.as_u16(), &body)
    }
}

/// Interpret a Bot API reply. Both the HTTP status and the `ok` flag must agree.
fn check_reply(status: u16, body: &str) -> Result<(), NotifyError> {
    let reply = serde_json::from_str::<ApiReply>(body).ok();

    if !(200..300).contains(&status) {
        return Err(NotifyError::Status {
            status,
            description: reply
                .and_then(|r| r.description)
                .unwrap_or_else(|| body.to_string()),
        });
    }

    match reply {
        Some(ApiReply { ok: true, .. }) => Ok(()),
        Some(ApiReply { description, .. }) => Err(NotifyError::Rejected(
            description.unwrap_or_else(|| "ok=false".to_string()),
        )),
        None => Err(NotifyError::Rejected(format!("unexpected reply: {body}"))),
    }
}
