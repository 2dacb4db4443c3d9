//! AI Provider Port - Interface for the generative model.
//!
//! This port abstracts the single call the content service makes: submit a
//! prompt with optional capabilities and get back the raw response
//! envelope. Implementations do not look at the content; interpreting it
//! is the domain's job.
//!
//! # Design
//!
//! - One non-streaming call per operation
//! - The credential travels with each request, so a key removed from the
//!   environment takes effect on the next call
//! - Timeouts belong to the transport; there are no retries

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::content::{
    Capability, ModelEnvelope, OperationKind, Prompt, ResponseFormat,
};

/// Port for generative model interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Runs one generation call.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError>;

    /// Get provider information (name, model, capabilities).
    fn provider_info(&self) -> ProviderInfo;
}

/// An API key, redacted from debug output.
#[derive(Clone)]
pub struct ApiKey(Secret<String>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Secret::new(key.into()))
    }

    /// Exposes the key (for making requests).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Request for a generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Operation that produced the prompt, for tracing.
    pub kind: OperationKind,
    /// The rendered instruction.
    pub prompt: String,
    /// Tools offered to the model.
    pub capabilities: Vec<Capability>,
    /// Requested output format.
    pub response_format: ResponseFormat,
    /// Credential read for this call.
    pub api_key: ApiKey,
}

impl GenerationRequest {
    /// Builds a request from a rendered prompt.
    pub fn from_prompt(prompt: Prompt, api_key: ApiKey) -> Self {
        Self {
            kind: prompt.kind,
            prompt: prompt.text,
            capabilities: prompt.capabilities,
            response_format: prompt.response_format,
            api_key,
        }
    }

    /// True when web search grounding is declared.
    pub fn wants_web_search(&self) -> bool {
        self.capabilities
            .iter()
            .any(|c| matches!(c, Capability::WebSearch))
    }
}

/// Response from a generation call.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Uninterpreted output.
    pub envelope: ModelEnvelope,
    /// Token usage.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

impl GenerationResponse {
    /// A response carrying the envelope with default metadata.
    pub fn new(envelope: ModelEnvelope, model: impl Into<String>) -> Self {
        Self {
            envelope,
            usage: TokenUsage::zero(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates new token usage.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// Creates zero usage.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit the output token limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    /// Anything else the provider reported.
    Other,
}

/// Provider information and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini").
    pub name: String,
    /// Model identifier (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Whether web search grounding is supported.
    pub supports_web_search: bool,
    /// Whether function calling is supported.
    pub supports_functions: bool,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            supports_web_search: false,
            supports_functions: false,
        }
    }

    /// Sets web search support.
    pub fn with_web_search(mut self, supports: bool) -> Self {
        self.supports_web_search = supports;
        self
    }

    /// Sets function calling support.
    pub fn with_functions(mut self, supports: bool) -> Self {
        self.supports_functions = supports;
        self
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered {
        /// Reason for filtering.
        reason: String,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AIError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates a content filtered error.
    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::prompts;

    #[test]
    fn request_from_prompt_carries_capabilities_and_format() {
        let prompt = prompts::intelligence_analysis("CBAM");
        let request = GenerationRequest::from_prompt(prompt, ApiKey::new("k"));

        assert_eq!(request.kind, OperationKind::IntelligenceAnalysis);
        assert!(request.wants_web_search());
        assert_eq!(request.response_format, ResponseFormat::Json);
        assert!(request.prompt.contains("CBAM"));
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let key = ApiKey::new("super-secret");
        assert_eq!(key.expose(), "super-secret");
        assert!(!format!("{:?}", key).contains("super-secret"));
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
        assert_eq!(TokenUsage::zero().total_tokens, 0);
    }

    #[test]
    fn token_usage_total_saturates_on_huge_counts() {
        let usage = TokenUsage::new(u32::MAX, 1);
        assert_eq!(usage.prompt_tokens, u32::MAX);
        assert_eq!(usage.completion_tokens, 1);
        assert_eq!(usage.total_tokens, u32::MAX);
    }

    #[test]
    fn provider_info_builder_works() {
        let info = ProviderInfo::new("gemini", "gemini-2.5-flash")
            .with_web_search(true)
            .with_functions(true);

        assert_eq!(info.name, "gemini");
        assert!(info.supports_web_search);
        assert!(info.supports_functions);
    }

    #[test]
    fn finish_reason_serializes_snake_case() {
        let json = serde_json::to_string(&FinishReason::ContentFilter).unwrap();
        assert_eq!(json, "\"content_filter\"");
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(
            AIError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            AIError::content_filtered("SAFETY").to_string(),
            "content filtered: SAFETY"
        );
        assert_eq!(
            AIError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
    }
}
