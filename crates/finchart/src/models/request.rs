use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::Message;
use crate::errors::{AnalystError, AnalystResult};

/// A file the user attached to their latest message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub is_text: bool,
}

/// An inbound chat request after shape validation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub file_data: Option<FileData>,
    pub model: String,
}

impl ChatRequest {
    /// Validate a raw request body. Checks run in a fixed order: messages, then model,
    /// then individual message shapes, then the attachment.
    pub fn from_value(value: Value) -> AnalystResult<Self> {
        let Value::Object(mut body) = value else {
            return Err(AnalystError::MissingMessages);
        };

        let raw_messages = match body.remove("messages") {
            Some(Value::Array(items)) => items,
            _ => return Err(AnalystError::MissingMessages),
        };

        let model = match body.remove("model") {
            Some(Value::String(model)) if !model.trim().is_empty() => model,
            _ => return Err(AnalystError::MissingModel),
        };

        let messages = raw_messages
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_value::<Message>(raw).map_err(|e| {
                    AnalystError::Validation(format!("Invalid message at index {}: {}", index, e))
                })
            })
            .collect::<AnalystResult<Vec<_>>>()?;
        for message in &messages {
            message.validate()?;
        }

        let file_data = match body.remove("fileData") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(
                serde_json::from_value(raw)
                    .map_err(|e| AnalystError::InvalidFile(format!("Malformed file data: {}", e)))?,
            ),
        };

        Ok(Self {
            messages,
            file_data,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_request() {
        let request = ChatRequest::from_value(json!({
            "messages": [{"role": "user", "content": "Show Q1 vs Q2 revenue"}],
            "model": "claude-3-5-sonnet-latest"
        }))
        .unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.model, "claude-3-5-sonnet-latest");
        assert!(request.file_data.is_none());
    }

    #[test]
    fn test_messages_checked_before_model() {
        assert_eq!(
            ChatRequest::from_value(json!({})).unwrap_err(),
            AnalystError::MissingMessages
        );
        assert_eq!(
            ChatRequest::from_value(json!({"messages": "hi", "model": "m"})).unwrap_err(),
            AnalystError::MissingMessages
        );
        assert_eq!(
            ChatRequest::from_value(json!({"messages": []})).unwrap_err(),
            AnalystError::MissingModel
        );
        assert_eq!(
            ChatRequest::from_value(json!({"messages": [], "model": "  "})).unwrap_err(),
            AnalystError::MissingModel
        );
    }

    #[test]
    fn test_malformed_message_is_validation_error() {
        let err = ChatRequest::from_value(json!({
            "messages": [{"role": "user", "content": "ok"}, {"content": "no role"}],
            "model": "m"
        }))
        .unwrap_err();
        match err {
            AnalystError::Validation(msg) => assert!(msg.starts_with("Invalid message at index 1")),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_data_fields() {
        let request = ChatRequest::from_value(json!({
            "messages": [{"role": "user", "content": "summarize"}],
            "model": "m",
            "fileData": {"base64": "aGVsbG8=", "mediaType": "text/plain", "fileName": "a.txt", "isText": true}
        }))
        .unwrap();
        let file = request.file_data.unwrap();
        assert_eq!(file.base64.as_deref(), Some("aGVsbG8="));
        assert_eq!(file.file_name, "a.txt");
        assert!(file.is_text);

        let err = ChatRequest::from_value(json!({
            "messages": [{"role": "user", "content": "summarize"}],
            "model": "m",
            "fileData": "not an object"
        }))
        .unwrap_err();
        assert!(matches!(err, AnalystError::InvalidFile(_)));
    }
}
