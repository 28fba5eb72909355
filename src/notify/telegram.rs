use super::notifier::Notifier;
use crate::config::TelegramConfig;
use crate::error::{BackupError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::borrow::Cow;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Telegram's limit on `sendMessage` text length, in characters.
const MAX_MESSAGE_CHARS: usize = 4096;
const TRUNCATION_MARKER: &str = "\n…(truncated)";

pub struct TelegramNotifier {
    config: TelegramConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("mysql-minio-backup/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackupError::Notify(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.config.api_url, self.config.bot_token)
    }
}

/// Shortens `message` to fit in one Telegram message, cutting on a char
/// boundary.
fn fit_message(message: &str) -> Cow<'_, str> {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return Cow::Borrowed(message);
    }
    let keep = MAX_MESSAGE_CHARS - TRUNCATION_MARKER.chars().count();
    let mut text: String = message.chars().take(keep).collect();
    text.push_str(TRUNCATION_MARKER);
    Cow::Owned(text)
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        let text = fit_message(message);
        if text.len() != message.len() {
            warn!("Notification text truncated to {} characters", MAX_MESSAGE_CHARS);
        }

        let response = self
            .client
            .post(self.send_message_url())
            .form(&[("chat_id", self.config.chat_id.as_str()), ("text", text.as_ref())])
            .send()
            .await
            // reqwest errors carry the URL, which embeds the bot token
            .map_err(|e| BackupError::Notify(e.without_url().to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let reply: Option<ApiReply> = serde_json::from_str(&body).ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => {
                debug!("Telegram accepted message for chat {}", self.config.chat_id);
                Ok(())
            }
            Some(reply) => Err(BackupError::Notify(format!(
                "Telegram rejected message: {} - {}",
                status,
                reply.description.unwrap_or_default()
            ))),
            None => Err(BackupError::Notify(format!(
                "unexpected Telegram reply: {} - {}",
                status, body
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "Telegram"
    }
}
