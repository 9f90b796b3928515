use serde::{Deserialize, Serialize};

use super::base::Usage;
use crate::models::tool::ToolInvocation;

/// One typed block of the service's reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseContent {
    Text {
        text: String,
    },
    ToolUse(ToolInvocation),
    /// Block types this pipeline does not consume
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub content: Vec<ResponseContent>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

impl MessagesResponse {
    pub fn new(content: Vec<ResponseContent>) -> Self {
        Self {
            id: String::new(),
            model: String::new(),
            content,
            stop_reason: None,
            usage: Usage::default(),
        }
    }
}

/// What the rest of the pipeline consumes from a reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub text: Option<String>,
    pub tool_use: Option<ToolInvocation>,
    pub has_tool_use: bool,
}

/// Take the first text block and the first tool invocation; later ones are ignored.
pub fn parse_response(response: &MessagesResponse) -> ParsedReply {
    let text = response.content.iter().find_map(|block| match block {
        ResponseContent::Text { text } => Some(text.clone()),
        _ => None,
    });
    let tool_use = response.content.iter().find_map(|block| match block {
        ResponseContent::ToolUse(invocation) => Some(invocation.clone()),
        _ => None,
    });

    ParsedReply {
        has_tool_use: tool_use.is_some(),
        text,
        tool_use,
    }
}
