//! Struct and methods to call the Telegram Bot API

use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct TelegramApi {
    token: String,
}

impl TelegramApi {
    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self {
            token: dotenv::var("BOT_TOKEN")?,
        })
    }

    pub fn from_token(token: String) -> Self {
        Self { token }
    }

    /// Webhook route for this bot. The token in the path is the shared
    /// secret Telegram is configured to call.
    pub fn webhook_path(&self) -> String {
        format!("/{}", self.token)
    }

    /// Sends a Markdown reply to a chat. Fire-and-forget: delivery failures
    /// are logged and never propagated to the webhook caller.
    pub async fn send_message(&self, chat_id: i64, text: &str) {
        let api = format!("https://api.telegram.org/bot{}/sendMessage", self.token);

        debug!("Calling Telegram API: sendMessage to chat {}", chat_id);

        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
            "disable_web_page_preview": true
        });

        let client = reqwest::Client::new();
        match client
            .post(&api)
            .timeout(SEND_TIMEOUT)
            .json(&body)
            .send()
            .await
        {
            Ok(response) if !response.status().is_success() => {
                warn!("Telegram sendMessage failed with status: {}", response.status());
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Telegram sendMessage failed: {}", e);
            }
        }
    }
}
