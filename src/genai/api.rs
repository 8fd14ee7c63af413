//! Struct and methods to call OpenRouter's chat completions API

use crate::genai::openrouter_response::OpenRouterResponse;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct OpenRouterApi {
    api_key: String,
    model: String,
}

impl OpenRouterApi {
    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self {
            api_key: dotenv::var("OPENROUTER_API_KEY")?,
            model: dotenv::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn from_parts(api_key: String, model: String) -> Self {
        Self { api_key, model }
    }

    /// One completion call, one attempt. Returns the first choice's text.
    pub async fn chat(&self, prompt: String) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        debug!("Prompt: \n{}", prompt);

        let body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let client = Client::new();

        let response = client
            .post(OPENROUTER_URL)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", "https://tubot.com")
            .timeout(COMPLETION_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            let response: OpenRouterResponse = serde_json::from_str(&response.text().await?)?;
            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or("OpenRouter response contained no choices")?;
            Ok(choice.message.content)
        } else {
            warn!(
                "OpenRouter call failed with status: {} {}",
                response.status(),
                response.text().await?
            );
            Err("OpenRouter call failed".into())
        }
    }
}
