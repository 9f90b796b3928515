use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::errors::{AnalystError, AnalystResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// Where the bytes of an image block come from
pub enum ImageSource {
    Base64 { media_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub source: ImageSource,
}

impl ImageContent {
    pub fn media_type(&self) -> &str {
        match &self.source {
            ImageSource::Base64 { media_type, .. } => media_type,
        }
    }

    pub fn data(&self) -> &str {
        match &self.source {
            ImageSource::Base64 { data, .. } => data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// One typed unit of a message's content, in the shape the generation service accepts
pub enum Content {
    Text(TextContent),
    Image(ImageContent),
}

impl Content {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Content::Text(TextContent { text: text.into() })
    }

    pub fn image<S: Into<String>, T: Into<String>>(data: S, media_type: T) -> Self {
        Content::Image(ImageContent {
            source: ImageSource::Base64 {
                media_type: media_type.into(),
                data: data.into(),
            },
        })
    }

    /// Get the text content if this is a TextContent variant
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    /// Get the image content as (data, media_type) if this is an ImageContent variant
    pub fn as_image(&self) -> Option<(&str, &str)> {
        match self {
            Content::Image(image) => Some((image.data(), image.media_type())),
            _ => None,
        }
    }

    /// Check the block invariants: images carry an `image/*` media type and valid base64
    pub fn validate(&self) -> AnalystResult<()> {
        let Content::Image(image) = self else {
            return Ok(());
        };

        if !image.media_type().starts_with("image/") {
            return Err(AnalystError::Validation(format!(
                "Unsupported image media type: {}",
                image.media_type()
            )));
        }
        BASE64.decode(image.data()).map_err(|e| {
            AnalystError::Validation(format!("Image data is not valid base64: {}", e))
        })?;
        Ok(())
    }
}
