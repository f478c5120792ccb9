//! Text-generation port - interface to the external generation backend.
//!
//! The backend is an opaque capability: given a role instruction plus
//! structured context, it returns natural-language text or a classified
//! error. Implementations never mutate conversation state; they are
//! stateless per call aside from configured credentials and endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one request and returns the generated text.
    ///
    /// Exactly one outbound network call per invocation; retry policy, if
    /// any, lives inside the adapter and is invisible to callers.
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedText, GenerationError>;

    /// Backend identity (provider and model), for logging.
    fn backend_info(&self) -> BackendInfo;
}

/// A request for generated text.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Role instruction guiding the backend's behavior.
    pub instruction: String,
    /// Ordered conversational context (recent transcript tail).
    pub context: Vec<ContextMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Creates a request with the given instruction and no context.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            context: Vec::new(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Appends a context message.
    pub fn with_context(mut self, role: ContextRole, content: impl Into<String>) -> Self {
        self.context.push(ContextMessage {
            role,
            content: content.into(),
        });
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A message in the generation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    pub role: ContextRole,
    pub content: String,
}

/// Role of a context message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextRole {
    System,
    User,
    Assistant,
}

/// Generated text returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    /// The generated content, trimmed.
    pub content: String,
    /// Model that produced it.
    pub model: String,
}

/// Backend identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Provider name (e.g., "openai", "groq", "mock").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl BackendInfo {
    /// Creates backend info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Classified generation backend failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthFailure,

    /// Rate limited by the backend.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Backend is unreachable or returned a server error.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Response could not be parsed into generated text.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Error details.
        message: String,
    },
}

impl GenerationError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Returns true if a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Unavailable { .. }
        )
    }
}
