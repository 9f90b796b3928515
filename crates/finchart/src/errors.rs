use serde::Serialize;
use thiserror::Error;

use crate::providers::base::ProviderError;

/// Everything that can abort a request, from validation through to chart normalization.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalystError {
    #[error("Messages array is required")]
    MissingMessages,

    #[error("Model selection is required")]
    MissingModel,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid file data: {0}")]
    InvalidFile(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Invalid chart data structure: {0}")]
    InvalidChartData(String),

    #[error("Generation service error: {message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AnalystResult<T> = Result<T, AnalystError>;

/// Stable classification of a failure, independent of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller sent a malformed request
    Validation,
    /// An attached file could not be read
    FileProcessing,
    /// The model returned chart tool input that does not fit the chart contract
    ChartDataShape,
    /// The generation service call failed
    Upstream,
    Unknown,
}

/// The JSON body returned for a failed request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl AnalystError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalystError::MissingMessages
            | AnalystError::MissingModel
            | AnalystError::Validation(_) => ErrorKind::Validation,
            AnalystError::InvalidFile(_) | AnalystError::UnsupportedFileType(_) => {
                ErrorKind::FileProcessing
            }
            AnalystError::InvalidChartData(_) => ErrorKind::ChartDataShape,
            AnalystError::Upstream { .. } => ErrorKind::Upstream,
            AnalystError::Internal(_) => ErrorKind::Unknown,
        }
    }

    /// HTTP status for this failure. Chart shape errors stay server-side (500):
    /// the caller did not produce the malformed payload.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalystError::Upstream {
                status: Some(status),
                ..
            } if (400..=599).contains(status) => *status,
            _ => match self.kind() {
                ErrorKind::Validation | ErrorKind::FileProcessing => 400,
                ErrorKind::ChartDataShape | ErrorKind::Upstream | ErrorKind::Unknown => 500,
            },
        }
    }

    pub fn body(&self) -> ErrorBody {
        let code = self.status_code();
        match self {
            AnalystError::InvalidChartData(reason) => ErrorBody {
                error: "Invalid chart data structure".to_string(),
                details: Some(reason.clone()),
                code: Some(code),
            },
            AnalystError::Upstream { message, .. } => ErrorBody {
                error: "API Error".to_string(),
                details: Some(message.clone()),
                code: Some(code),
            },
            AnalystError::Internal(reason) => ErrorBody {
                error: "An unknown error occurred".to_string(),
                details: Some(reason.clone()),
                code: Some(code),
            },
            _ => ErrorBody {
                error: self.to_string(),
                details: None,
                code: None,
            },
        }
    }
}

impl From<ProviderError> for AnalystError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Status { status, message } => AnalystError::Upstream {
                status: Some(status),
                message,
            },
            other => AnalystError::Upstream {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl From<tera::Error> for AnalystError {
    fn from(err: tera::Error) -> Self {
        AnalystError::Internal(format!("Failed to render prompt: {}", err))
    }
}

impl From<anyhow::Error> for AnalystError {
    fn from(err: anyhow::Error) -> Self {
        AnalystError::Internal(err.to_string())
    }
}
