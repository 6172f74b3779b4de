//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{Config, Credentials};
use crate::io::HttpClient;
use crate::notifier::Notifier;
use crate::WatchError;

/// Envelope returned by every Bot API method
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to a single Telegram chat
pub struct TelegramNotifier {
    send_message_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &Config, credentials: &Credentials, http: Arc<dyn HttpClient>) -> Self {
        let api_url = config.telegram.api_url.trim_end_matches('/');
        tracing::debug!(
            "Created TelegramNotifier for chat {} via {}",
            credentials.destination_id,
            api_url
        );

        Self {
            send_message_url: format!("{}/bot{}/sendMessage", api_url, credentials.notify_token),
            chat_id: credentials.destination_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, message: &str) -> crate::Result<()> {
        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];
        let response = self
            .http
            .post_form(&self.send_message_url, &params)
            .await
            .map_err(|e| WatchError::Delivery(e.to_string()))?;

        if response.status != 200 {
            return Err(WatchError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        if let Ok(BotApiResponse {
            ok: false,
            description,
        }) = serde_json::from_str::<BotApiResponse>(&response.body)
        {
            return Err(WatchError::Delivery(format!(
                "Telegram API rejected the message: {}",
                description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
