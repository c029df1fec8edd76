use crate::error::{NotifyError, Result};
use crate::Notifier;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API channel.
///
/// Every send first calls `getMe` and compares the returned bot id against
/// the configured one; on mismatch the call fails with
/// [`NotifyError::IdentityMismatch`] and no message leaves the process.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    expected_bot_id: i64,
    chat_id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BotIdentity {
    id: i64,
}

impl TelegramNotifier {
    pub fn new(
        bot_token: &str,
        expected_bot_id: i64,
        chat_id: i64,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token: bot_token.to_string(),
            expected_bot_id,
            chat_id,
        })
    }

    /// Overrides the API base URL. Used by tests against a local stub.
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token, method)
    }

    async fn verify_identity(&self) -> Result<()> {
        let response = self.client.get(self.url("getMe")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let envelope: ApiEnvelope<BotIdentity> = response.json().await?;
        let identity = match envelope {
            ApiEnvelope {
                ok: true,
                result: Some(identity),
                ..
            } => identity,
            ApiEnvelope { description, .. } => {
                return Err(NotifyError::Malformed(
                    description.unwrap_or_else(|| "getMe returned no bot identity".to_string()),
                ))
            }
        };

        if identity.id != self.expected_bot_id {
            return Err(NotifyError::IdentityMismatch {
                expected: self.expected_bot_id,
                actual: identity.id,
            });
        }
        tracing::debug!(bot_id = identity.id, "Bot identity verified");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.verify_identity().await?;

        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });
        let response = self
            .client
            .post(self.url("sendMessage"))
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
