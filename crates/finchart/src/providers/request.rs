use serde::Serialize;

use super::configs::GenerationSettings;
use crate::errors::{AnalystError, AnalystResult};
use crate::models::message::Message;
use crate::models::tool::Tool;
use crate::tools::ToolRegistry;

pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// The model decides whether to call a tool
pub enum ToolChoice {
    Auto,
}

/// Outbound payload for the generation service's messages endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system: String,
    pub messages: Vec<Message>,
    pub tools: Vec<Tool>,
    pub tool_choice: ToolChoice,
}

/// Combine the conversation, every registered tool and the system instruction into
/// one request. Performs no validation beyond requiring messages and a model.
pub fn build_request(
    model: &str,
    messages: Vec<Message>,
    tools: &ToolRegistry,
    system: &str,
    settings: &GenerationSettings,
) -> AnalystResult<MessagesRequest> {
    if messages.is_empty() {
        return Err(AnalystError::MissingMessages);
    }
    if model.trim().is_empty() {
        return Err(AnalystError::MissingModel);
    }

    Ok(MessagesRequest {
        model: model.to_string(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        system: system.to_string(),
        messages,
        tools: tools.tools().to_vec(),
        tool_choice: ToolChoice::Auto,
    })
}
