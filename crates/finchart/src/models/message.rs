use super::content::Content;
use super::role::Role;
use crate::errors::AnalystResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// Message content is either a bare string or an ordered list of typed blocks
pub enum MessageContent {
    Text(String),
    Blocks(Vec<Content>),
}

impl MessageContent {
    /// The plain text of this content; text blocks are joined with newlines
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(Content::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn blocks(&self) -> Vec<Content> {
        match self {
            MessageContent::Text(text) => vec![Content::text(text.clone())],
            MessageContent::Blocks(blocks) => blocks.clone(),
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Blocks(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A conversation turn to or from the generation service
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn new(role: Role, content: MessageContent) -> Self {
        Message { role, content }
    }

    /// Create a new user message with no content
    pub fn user() -> Self {
        Message::new(Role::User, MessageContent::default())
    }

    /// Add a content block, promoting bare string content to a block list first
    pub fn with_content(mut self, content: Content) -> Self {
        let mut blocks = self.content.blocks();
        blocks.push(content);
        self.content = MessageContent::Blocks(blocks);
        self
    }

    /// Add text content to the message
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_content(Content::text(text))
    }

    /// Add image content to the message
    pub fn with_image<S: Into<String>, T: Into<String>>(self, data: S, media_type: T) -> Self {
        self.with_content(Content::image(data, media_type))
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    /// Check every block in the message against the content invariants
    pub fn validate(&self) -> AnalystResult<()> {
        if let MessageContent::Blocks(blocks) = &self.content {
            for block in blocks {
                block.validate()?;
            }
        }
        Ok(())
    }
}
