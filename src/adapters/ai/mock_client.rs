//! Mock generator for testing.
//!
//! A configurable implementation of the TextGenerator port so tests can run
//! without calling a real backend.
//!
//! # Features
//!
//! - Pre-scripted replies and injected errors, consumed in order
//! - A default reply once the script runs out
//! - Call recording for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockGenerator::new()
//!     .with_reply("Welcome to the screening!")
//!     .with_error(GenerationError::AuthFailure);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    BackendInfo, GeneratedText, GenerationError, GenerationRequest, TextGenerator,
};

/// A scripted mock outcome.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(GenerationError),
}

/// Mock generator for testing.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    /// Scripted outcomes, consumed in order.
    script: Arc<Mutex<VecDeque<MockReply>>>,
    /// Reply used once the script is exhausted.
    default_reply: String,
    /// Whether an empty script yields errors instead of the default reply.
    fail_when_exhausted: bool,
    /// Recorded requests for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    /// Creates a mock that answers every request with a default reply.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: "mock reply".to_string(),
            fail_when_exhausted: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock whose every call fails with `Unavailable`.
    ///
    /// Convenient for exercising degraded-mode paths.
    pub fn unavailable() -> Self {
        let mut mock = Self::new();
        mock.fail_when_exhausted = true;
        mock
    }

    /// Queues a successful scripted reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .push_back(MockReply::Text(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: GenerationError) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .push_back(MockReply::Error(error));
        self
    }

    /// Sets the reply used once the script is exhausted.
    pub fn with_default_reply(mut self, content: impl Into<String>) -> Self {
        self.default_reply = content.into();
        self
    }

    /// Number of generate calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    /// Snapshot of the instructions received, in call order.
    pub fn instructions(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|r| r.instruction.clone())
            .collect()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedText, GenerationError> {
        self.calls.lock().expect("calls lock").push(request);

        let scripted = self.script.lock().expect("script lock").pop_front();
        match scripted {
            Some(MockReply::Text(content)) => Ok(GeneratedText {
                content,
                model: "mock-model".to_string(),
            }),
            Some(MockReply::Error(error)) => Err(error),
            None if self.fail_when_exhausted => {
                Err(GenerationError::unavailable("mock backend down"))
            }
            None => Ok(GeneratedText {
                content: self.default_reply.clone(),
                model: "mock-model".to_string(),
            }),
        }
    }

    fn backend_info(&self) -> BackendInfo {
        BackendInfo::new("mock", "mock-model")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_replies_are_consumed_in_order() {
        let mock = MockGenerator::new().with_reply("first").with_reply("second");

        let a = mock.generate(GenerationRequest::new("i")).await.unwrap();
        let b = mock.generate(GenerationRequest::new("i")).await.unwrap();
        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");
    }

    #[tokio::test]
    async fn falls_back_to_default_reply() {
        let mock = MockGenerator::new().with_default_reply("fallback");
        let text = mock.generate(GenerationRequest::new("i")).await.unwrap();
        assert_eq!(text.content, "fallback");
    }

    #[tokio::test]
    async fn scripted_errors_are_returned() {
        let mock = MockGenerator::new().with_error(GenerationError::AuthFailure);
        let err = mock.generate(GenerationRequest::new("i")).await.unwrap_err();
        assert!(matches!(err, GenerationError::AuthFailure));
    }

    #[tokio::test]
    async fn unavailable_mock_always_fails() {
        let mock = MockGenerator::unavailable();
        assert!(mock.generate(GenerationRequest::new("i")).await.is_err());
        assert!(mock.generate(GenerationRequest::new("i")).await.is_err());
    }

    #[tokio::test]
    async fn records_calls() {
        let mock = MockGenerator::new();
        let _ = mock.generate(GenerationRequest::new("greet")).await;
        let _ = mock.generate(GenerationRequest::new("redirect")).await;

        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.instructions(), vec!["greet", "redirect"]);
    }
}
