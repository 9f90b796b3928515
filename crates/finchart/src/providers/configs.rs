use serde::Deserialize;

use super::request::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

pub const ANTHROPIC_HOST: &str = "https://api.anthropic.com";

/// Connection settings for the generation service. The model is chosen per request.
#[derive(Debug, Clone)]
pub struct AnthropicProviderConfig {
    pub host: String,
    pub api_key: String,
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
