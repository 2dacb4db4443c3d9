//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling the real model.
//!
//! # Features
//!
//! - Pre-configured envelopes, consumed in order
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new().with_text("## 診斷");
//! let response = provider.generate(request).await?;
//! assert_eq!(response.envelope.text(), "## 診斷");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::content::{Capability, ModelEnvelope, OperationKind};
use crate::ports::{
    AIError, AIProvider, FinishReason, GenerationRequest, GenerationResponse, ProviderInfo,
    TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Provider info to return.
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this envelope.
    Success(ModelEnvelope),
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing failure handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

/// What the mock saw on one call. The key itself is kept so tests can
/// check which credential reached the provider.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: OperationKind,
    pub prompt: String,
    pub web_search: bool,
    pub function_names: Vec<String>,
    pub api_key: String,
}

impl From<&GenerationRequest> for RecordedCall {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            kind: request.kind,
            prompt: request.prompt.clone(),
            web_search: request.wants_web_search(),
            function_names: request
                .capabilities
                .iter()
                .filter_map(|c| match c {
                    Capability::Function(def) => Some(def.name().to_string()),
                    Capability::WebSearch => None,
                })
                .collect(),
            api_key: request.api_key.expose().to_string(),
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1")
                .with_web_search(true)
                .with_functions(true),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a single-text-part envelope.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_envelope(ModelEnvelope::from_text(text))
    }

    /// Queues an envelope.
    pub fn with_envelope(self, envelope: ModelEnvelope) -> Self {
        self.push(MockResponse::Success(envelope));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn push(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Gets the next response, or an empty envelope once the queue is drained.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(ModelEnvelope::default()))
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError> {
        self.calls.lock().unwrap().push(RecordedCall::from(&request));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(envelope) => Ok(GenerationResponse {
                envelope,
                usage: TokenUsage::new(10, 20),
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::prompts;
    use crate::ports::ApiKey;

    fn request() -> GenerationRequest {
        GenerationRequest::from_prompt(prompts::chat("你好", &Default::default()), ApiKey::new("k1"))
    }

    #[tokio::test]
    async fn returns_queued_envelopes_in_order() {
        let provider = MockAIProvider::new().with_text("first").with_text("second");

        let first = provider.generate(request()).await.unwrap();
        let second = provider.generate(request()).await.unwrap();

        assert_eq!(first.envelope.text(), "first");
        assert_eq!(second.envelope.text(), "second");
    }

    #[tokio::test]
    async fn drained_queue_returns_empty_envelope() {
        let provider = MockAIProvider::new();
        let response = provider.generate(request()).await.unwrap();
        assert!(response.envelope.text_parts.is_empty());
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 60 });

        let result = provider.generate(request()).await;
        assert!(matches!(result, Err(AIError::Timeout { timeout_secs: 60 })));
    }

    #[tokio::test]
    async fn records_calls() {
        let provider = MockAIProvider::new();
        provider.generate(request()).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        let call = provider.last_call().unwrap();
        assert_eq!(call.kind, OperationKind::Chat);
        assert!(call.web_search);
        assert_eq!(call.function_names, vec!["navigate_to_section".to_string()]);
        assert_eq!(call.api_key, "k1");
    }
}
