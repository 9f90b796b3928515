use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finchart::errors::AnalystError;
use thiserror::Error;

pub const ENV_PREFIX: &str = "FINCHART";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Environment variable that sets the dotted settings path, e.g.
/// `provider.api_key` -> `FINCHART_PROVIDER__API_KEY`
pub fn to_env_var(path: &str) -> String {
    format!("{}_{}", ENV_PREFIX, path.replace('.', "__").to_uppercase())
}

/// Wraps a pipeline failure so handlers can return it directly
#[derive(Debug)]
pub struct ApiError(pub AnalystError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.body())).into_response()
    }
}

impl From<AnalystError> for ApiError {
    fn from(err: AnalystError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AnalystError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}
