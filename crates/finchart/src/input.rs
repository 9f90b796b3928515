use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{AnalystError, AnalystResult};
use crate::models::content::Content;
use crate::models::message::{Message, MessageContent};
use crate::models::request::FileData;

/// What to do with an attachment that is neither text nor an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedFilePolicy {
    #[default]
    Ignore,
    Reject,
}

/// Fold an optional attachment into the conversation.
///
/// Text files are decoded and placed ahead of the user's final message text; images
/// are placed ahead of it as an image block. Without an attachment the messages are
/// returned as given.
pub fn normalize_messages(
    mut messages: Vec<Message>,
    file: Option<&FileData>,
    policy: UnsupportedFilePolicy,
) -> AnalystResult<Vec<Message>> {
    let Some(file) = file else {
        return Ok(messages);
    };

    let Some(last) = messages.last_mut() else {
        return Ok(messages);
    };
    let original_text = last.text();

    if file.is_text {
        let bytes = decode(file)?;
        let text = String::from_utf8(bytes).map_err(|_| {
            AnalystError::InvalidFile(format!("{} is not valid UTF-8 text", file.file_name))
        })?;
        debug!(file_name = %file.file_name, bytes = text.len(), "attaching text file");
        last.content = MessageContent::Blocks(vec![
            Content::text(format!("File contents of {}:\n\n{}", file.file_name, text)),
            Content::text(original_text),
        ]);
    } else if file.media_type.starts_with("image/") {
        // checked here, sent on still encoded
        decode(file)?;
        debug!(file_name = %file.file_name, media_type = %file.media_type, "attaching image");
        last.content = MessageContent::Blocks(vec![
            Content::image(encoded(file)?, file.media_type.clone()),
            Content::text(original_text),
        ]);
    } else {
        match policy {
            UnsupportedFilePolicy::Ignore => {
                warn!(
                    file_name = %file.file_name,
                    media_type = %file.media_type,
                    "dropping attachment with unsupported media type"
                );
            }
            UnsupportedFilePolicy::Reject => {
                return Err(AnalystError::UnsupportedFileType(file.media_type.clone()));
            }
        }
    }

    Ok(messages)
}

fn encoded(file: &FileData) -> AnalystResult<&str> {
    file.base64
        .as_deref()
        .filter(|data| !data.is_empty())
        .ok_or_else(|| AnalystError::InvalidFile("missing base64 payload".to_string()))
}

fn decode(file: &FileData) -> AnalystResult<Vec<u8>> {
    BASE64
        .decode(encoded(file)?)
        .map_err(|e| AnalystError::InvalidFile(format!("could not decode base64: {}", e)))
}
