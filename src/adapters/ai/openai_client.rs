//! OpenAI-compatible chat-completions client.
//!
//! Serves both supported providers: OpenAI itself and Groq, which exposes an
//! OpenAI-compatible endpoint. Provider selection only changes the base URL
//! and default model.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiClientConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let client = OpenAiClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::GenerationConfig;
use crate::ports::{
    BackendInfo, ContextRole, GeneratedText, GenerationError, GenerationRequest, TextGenerator,
};

/// Configuration for the OpenAI-compatible client.
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Provider name for logging ("openai" or "groq").
    pub provider_name: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAiClientConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            provider_name: "openai".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }

    /// Builds a client configuration from the loaded application config.
    pub fn from_generation_config(config: &GenerationConfig) -> Self {
        let key = config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().clone())
            .unwrap_or_default();
        Self::new(key)
            .with_model(config.model_name())
            .with_base_url(config.endpoint())
            .with_provider_name(format!("{:?}", config.provider).to_lowercase())
            .with_timeout(config.timeout())
            .with_max_retries(config.max_retries)
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the provider name used in logs.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible chat-completions implementation of the generator port.
pub struct OpenAiClient {
    config: OpenAiClientConfig,
    client: Client,
}

impl OpenAiClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenAiClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts a port request to the wire format.
    fn to_wire_request(&self, request: &GenerationRequest) -> WireRequest {
        let mut messages = vec![WireMessage {
            role: "system".to_string(),
            content: request.instruction.clone(),
        }];

        for msg in &request.context {
            messages.push(WireMessage {
                role: match msg.role {
                    ContextRole::System => "system",
                    ContextRole::User => "user",
                    ContextRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        WireRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, GenerationError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else {
                    GenerationError::unavailable(e.to_string())
                }
            })
    }

    /// Maps HTTP status codes into the error taxonomy.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GenerationError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GenerationError::AuthFailure),
            429 => Err(GenerationError::rate_limited(Self::parse_retry_after(
                &error_body,
            ))),
            500..=599 => Err(GenerationError::unavailable(format!(
                "server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerationError::malformed(format!(
                "unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses a retry hint from the error body, defaulting to 30 seconds.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(msg) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                if let Some(idx) = msg.find("try again in ") {
                    let rest = &msg[idx + 13..];
                    if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                        if let Ok(secs) = rest[..num_end].parse::<u32>() {
                            return secs;
                        }
                    }
                }
            }
        }
        30
    }

    async fn parse_response(&self, response: Response) -> Result<GeneratedText, GenerationError> {
        let response = self.handle_response_status(response).await?;

        let wire_response: WireResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::malformed(format!("failed to parse response: {}", e)))?;

        let choice = wire_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::malformed("no choices in response"))?;

        let content = choice.message.content.trim().to_string();
        if content.is_empty() {
            return Err(GenerationError::malformed("empty completion content"));
        }

        Ok(GeneratedText {
            content,
            model: wire_response.model,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedText, GenerationError> {
        let mut last_error = GenerationError::unavailable("no attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            let outcome = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match outcome {
                Ok(text) => return Ok(text),
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        tracing::error!(
                            provider = %self.config.provider_name,
                            error = %err,
                            "generation request failed"
                        );
                        return Err(err);
                    }
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            let delay = Duration::from_secs(1 << retry_count);
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }

    fn backend_info(&self) -> BackendInfo {
        BackendInfo::new(&self.config.provider_name, &self.config.model)
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;

    #[test]
    fn config_builder_works() {
        let config = OpenAiClientConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(10))
            .with_max_retries(5);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn groq_config_switches_endpoint_and_model() {
        let generation = GenerationConfig {
            provider: Provider::Groq,
            api_key: Some(Secret::new("gsk-test".to_string())),
            ..Default::default()
        };
        let config = OpenAiClientConfig::from_generation_config(&generation);

        assert_eq!(config.provider_name, "groq");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert!(config.base_url.contains("api.groq.com"));
    }

    #[test]
    fn wire_request_includes_instruction_first() {
        let client = OpenAiClient::new(OpenAiClientConfig::new("test"));
        let request = GenerationRequest::new("Be brief")
            .with_context(ContextRole::User, "Hello")
            .with_max_tokens(100);

        let wire = client.to_wire_request(&request);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[0].content, "Be brief");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.max_tokens, Some(100));
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 30 seconds."}}"#;
        assert_eq!(OpenAiClient::parse_retry_after(error), 30);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(OpenAiClient::parse_retry_after(error), 30);
    }

    #[test]
    fn backend_info_reports_provider_and_model() {
        let client = OpenAiClient::new(
            OpenAiClientConfig::new("test")
                .with_provider_name("groq")
                .with_model("llama-3.1-8b-instant"),
        );
        let info = client.backend_info();
        assert_eq!(info.name, "groq");
        assert_eq!(info.model, "llama-3.1-8b-instant");
    }
}
