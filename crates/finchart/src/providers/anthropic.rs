use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::base::{Provider, ProviderError};
use super::configs::AnthropicProviderConfig;
use super::request::MessagesRequest;
use super::response::MessagesResponse;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    config: AnthropicProviderConfig,
}

impl AnthropicProvider {
    /// Build the client once; it keeps the transport's default timeout.
    pub fn new(config: AnthropicProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    async fn post(&self, payload: &MessagesRequest) -> Result<Value, ProviderError> {
        let url = format!("{}/v1/messages", self.config.host.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(ProviderError::Status {
            status: status.as_u16(),
            message: error_message(&error_text)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string()),
        })
    }
}

/// Pull the human readable message out of the service's error envelope,
/// falling back to the raw body.
fn error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    let parsed = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(String::from));
    Some(parsed.unwrap_or_else(|| body.to_string()))
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn complete(&self, request: &MessagesRequest) -> Result<MessagesResponse, ProviderError> {
        let response = self.post(request).await?;
        let response: MessagesResponse = serde_json::from_value(response)?;
        debug!(
            id = %response.id,
            stop_reason = ?response.stop_reason,
            input_tokens = ?response.usage.input_tokens,
            output_tokens = ?response.usage.output_tokens,
            "generation service replied"
        );
        Ok(response)
    }
}
