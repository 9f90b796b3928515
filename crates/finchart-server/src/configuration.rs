use crate::error::{to_env_var, ConfigError, ENV_PREFIX};
use config::{Config, Environment};
use finchart::{
    input::UnsupportedFilePolicy,
    providers::configs::{AnthropicProviderConfig, GenerationSettings, ANTHROPIC_HOST},
    providers::request::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE},
};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_anthropic_host")]
    pub host: String,
    pub api_key: String,
}

impl ProviderSettings {
    pub fn into_config(self) -> AnthropicProviderConfig {
        AnthropicProviderConfig {
            host: self.host,
            api_key: self.api_key,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FileSettings {
    /// Fail requests whose attachment is neither text nor an image
    #[serde(default)]
    pub reject_unsupported: bool,
}

impl FileSettings {
    pub fn policy(&self) -> UnsupportedFilePolicy {
        if self.reject_unsupported {
            UnsupportedFilePolicy::Reject
        } else {
            UnsupportedFilePolicy::Ignore
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub files: FileSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("provider.host", default_anthropic_host())?
            .set_default("generation.max_tokens", DEFAULT_MAX_TOKENS)?
            .set_default("generation.temperature", DEFAULT_TEMPERATURE as f64)?
            .set_default("files.reject_unsupported", false)?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match config.try_deserialize::<Self>() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                if let Some(path) = missing_field_path(&err.to_string()) {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(&path),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

/// Turn "missing field `api_key` for key `provider`" into "provider.api_key"
fn missing_field_path(message: &str) -> Option<String> {
    if !message.starts_with("missing field") {
        return None;
    }
    let parts: Vec<&str> = message.split('`').collect();
    let field = parts.get(1)?;
    match (parts.get(2), parts.get(3)) {
        (Some(joiner), Some(key)) if joiner.contains("for key") => {
            Some(format!("{}.{}", key, field))
        }
        _ => Some(field.to_string()),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_anthropic_host() -> String {
    ANTHROPIC_HOST.to_string()
}
