//! Generation backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Backend provider
    #[serde(default)]
    pub provider: Provider,

    /// API key for the selected provider
    pub api_key: Option<Secret<String>>,

    /// Model identifier; defaults per provider when unset
    pub model: Option<String>,

    /// Base URL override (useful for proxies and tests)
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// Generation provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAI,
    Groq,
}

impl GenerationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is present and non-empty
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Effective model identifier for the selected provider
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or(match self.provider {
            Provider::OpenAI => "gpt-4o-mini",
            Provider::Groq => "llama-3.1-8b-instant",
        })
    }

    /// Effective base URL for the selected provider
    pub fn endpoint(&self) -> &str {
        self.base_url.as_deref().unwrap_or(match self.provider {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::Groq => "https://api.groq.com/openai/v1",
        })
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("GENERATION__API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: None,
            model: None,
            base_url: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}
