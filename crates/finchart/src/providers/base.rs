use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::request::MessagesRequest;
use super::response::MessagesResponse;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Failure talking to the generation service
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Base trait for the generation service client.
///
/// One instance is built at startup and shared across requests; implementations make
/// a single call per request with no retries.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, request: &MessagesRequest) -> Result<MessagesResponse, ProviderError>;
}
