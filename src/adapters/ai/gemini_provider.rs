//! Gemini Provider - Implementation of AIProvider for Google's Gemini API.
//!
//! Calls the non-streaming `generateContent` endpoint once per request.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new()
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! # Capabilities
//!
//! Web search is declared as a `googleSearch` tool and functions as
//! `functionDeclarations`. The API refuses a JSON response MIME type when
//! tools are declared, so in that case the type is left out and the
//! interpreter relies on fence stripping instead.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::content::{Capability, FunctionCall, GroundingChunk, ModelEnvelope, ResponseFormat};
use crate::ports::{
    AIError, AIProvider, FinishReason, GenerationRequest, GenerationResponse, ProviderInfo,
    TokenUsage,
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const JSON_MIME_TYPE: &str = "application/json";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiConfig {
    /// Creates a configuration with the default model and endpoint.
    pub fn new() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
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

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends a request and maps transport failures.
    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, AIError> {
        let body = to_gemini_request(request);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", request.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), error_body))
    }

    async fn parse_response(&self, response: Response) -> Result<GenerationResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        into_generation_response(gemini_response, &self.config.model)
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError> {
        tracing::debug!(
            operation = request.kind.as_str(),
            model = %self.config.model,
            web_search = request.wants_web_search(),
            "Sending Gemini generateContent request"
        );

        let response = self.send_request(&request).await?;
        let generated = self.parse_response(response).await?;

        tracing::info!(
            operation = request.kind.as_str(),
            model = %generated.model,
            prompt_tokens = generated.usage.prompt_tokens,
            completion_tokens = generated.usage.completion_tokens,
            "Gemini call completed"
        );

        Ok(generated)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
            .with_web_search(true)
            .with_functions(true)
    }
}

/// Maps a non-success HTTP status to an error.
fn status_error(status: u16, error_body: String) -> AIError {
    match status {
        400 => AIError::InvalidRequest(error_body),
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_delay(&error_body)),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Reads `RetryInfo.retryDelay` (e.g. "17s") from an error body.
fn parse_retry_delay(error_body: &str) -> u32 {
    let parsed: serde_json::Value = match serde_json::from_str(error_body) {
        Ok(value) => value,
        Err(_) => return 30,
    };

    parsed["error"]["details"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|detail| detail.get("retryDelay").and_then(|d| d.as_str()))
        .find_map(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
        .map(|secs| secs.ceil() as u32)
        .unwrap_or(30)
}

/// Converts our request to Gemini's wire format.
fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
    let mut tools = Vec::new();
    if request.wants_web_search() {
        tools.push(GeminiTool::GoogleSearch {
            google_search: EmptyObject {},
        });
    }

    let declarations: Vec<serde_json::Value> = request
        .capabilities
        .iter()
        .filter_map(|c| match c {
            Capability::Function(definition) => Some(definition.to_gemini_format()),
            Capability::WebSearch => None,
        })
        .collect();
    if !declarations.is_empty() {
        tools.push(GeminiTool::Functions {
            function_declarations: declarations,
        });
    }

    let response_mime_type = match request.response_format {
        ResponseFormat::Json if tools.is_empty() => Some(JSON_MIME_TYPE.to_string()),
        _ => None,
    };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(request.prompt.clone()),
                function_call: None,
            }],
        }],
        tools,
        generation_config: response_mime_type.map(|mime| GenerationConfig {
            response_mime_type: Some(mime),
        }),
    }
}

/// Flattens a Gemini response into the envelope.
fn into_generation_response(
    response: GeminiResponse,
    configured_model: &str,
) -> Result<GenerationResponse, AIError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone())
    {
        return Err(AIError::content_filtered(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No candidates in response"))?;

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => {
            FinishReason::ContentFilter
        }
        Some(_) => FinishReason::Other,
    };

    let mut envelope = ModelEnvelope::default();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if let Some(text) = part.text {
            envelope.text_parts.push(text);
        }
        if let Some(call) = part.function_call {
            if envelope.function_call.is_none() {
                envelope.function_call = Some(FunctionCall::new(call.name, call.args));
            }
        }
    }

    if let Some(metadata) = candidate.grounding_metadata {
        envelope.grounding = metadata
            .grounding_chunks
            .into_iter()
            .map(|chunk| match chunk.web {
                Some(web) => GroundingChunk {
                    title: web.title,
                    uri: web.uri,
                },
                None => GroundingChunk::default(),
            })
            .collect();
    }

    let usage = response
        .usage_metadata
        .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
        .unwrap_or_default();

    Ok(GenerationResponse {
        envelope,
        usage,
        model: response
            .model_version
            .unwrap_or_else(|| configured_model.to_string()),
        finish_reason,
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Gemini API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    #[serde(default)]
    args: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiTool {
    GoogleSearch {
        #[serde(rename = "googleSearch")]
        google_search: EmptyObject,
    },
    Functions {
        #[serde(rename = "functionDeclarations")]
        function_declarations: Vec<serde_json::Value>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GeminiGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{prompts, HealthMetrics, OperationKind};
    use crate::ports::ApiKey;

    fn request_for(prompt: crate::domain::content::Prompt) -> GenerationRequest {
        GenerationRequest::from_prompt(prompt, ApiKey::new("test-key"))
    }

    fn parse_fixture(json: &str) -> Result<GenerationResponse, AIError> {
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        into_generation_response(response, DEFAULT_GEMINI_MODEL)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new()
            .with_model("gemini-2.5-pro")
            .with_base_url("http://localhost:8080/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.timeout, Duration::from_secs(5));

        let provider = GeminiProvider::new(config).unwrap();
        assert_eq!(
            provider.generate_url(),
            "http://localhost:8080/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn provider_info_reports_capabilities() {
        let provider = GeminiProvider::new(GeminiConfig::default()).unwrap();
        let info = provider.provider_info();

        assert_eq!(info.name, "gemini");
        assert_eq!(info.model, DEFAULT_GEMINI_MODEL);
        assert!(info.supports_web_search);
        assert!(info.supports_functions);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Request conversion
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn plain_text_request_has_no_tools_or_generation_config() {
        let metrics = HealthMetrics::new(80, 40, 60).unwrap();
        let body = serde_json::to_value(to_gemini_request(&request_for(prompts::diagnose(
            &metrics,
        ))))
        .unwrap();

        assert!(body.get("tools").is_none());
        assert!(body.get("generationConfig").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("80"));
    }

    #[test]
    fn json_request_without_tools_sets_mime_type() {
        let body =
            serde_json::to_value(to_gemini_request(&request_for(prompts::daily_missions(3))))
                .unwrap();

        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn json_request_with_search_omits_mime_type() {
        let request = request_for(prompts::intelligence_analysis("CBAM"));
        assert_eq!(request.kind, OperationKind::IntelligenceAnalysis);

        let body = serde_json::to_value(to_gemini_request(&request)).unwrap();

        assert_eq!(body["tools"][0], serde_json::json!({ "googleSearch": {} }));
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn chat_request_declares_search_and_navigation() {
        let context = crate::domain::content::ChatContext::default();
        let body = serde_json::to_value(to_gemini_request(&request_for(prompts::chat(
            "帶我去淨零頁",
            &context,
        ))))
        .unwrap();

        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(
            tools[1]["functionDeclarations"][0]["name"],
            "navigate_to_section"
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Response parsing
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parses_text_parts_usage_and_model() {
        let response = parse_fixture(
            r#"{
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "第一段" }, { "text": "第二段" }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 30, "totalTokenCount": 42 },
                "modelVersion": "gemini-2.5-flash-001"
            }"#,
        )
        .unwrap();

        assert_eq!(response.envelope.text(), "第一段第二段");
        assert_eq!(response.usage.total_tokens, 42);
        assert_eq!(response.model, "gemini-2.5-flash-001");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn parses_function_call_and_grounding() {
        let response = parse_fixture(
            r#"{
                "candidates": [{
                    "content": { "parts": [
                        { "functionCall": { "name": "navigate_to_section", "args": { "sectionId": "netzero" } } }
                    ]},
                    "groundingMetadata": { "groundingChunks": [
                        { "web": { "uri": "https://example.org/cbam", "title": "CBAM" } },
                        { "retrievedContext": {} }
                    ]}
                }]
            }"#,
        )
        .unwrap();

        let call = response.envelope.function_call.unwrap();
        assert_eq!(call.name(), "navigate_to_section");
        assert_eq!(call.str_arg("sectionId"), Some("netzero"));
        assert_eq!(response.envelope.grounding.len(), 2);
        assert_eq!(
            response.envelope.grounding[0],
            GroundingChunk::web("CBAM", "https://example.org/cbam")
        );
        assert_eq!(response.envelope.grounding[1].uri, None);
        assert_eq!(response.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn block_reason_maps_to_content_filtered() {
        let err = parse_fixture(r#"{ "promptFeedback": { "blockReason": "SAFETY" } }"#).unwrap_err();
        assert!(matches!(err, AIError::ContentFiltered { reason } if reason == "SAFETY"));
    }

    #[test]
    fn missing_candidates_is_parse_error() {
        let err = parse_fixture(r#"{ "candidates": [] }"#).unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn candidate_without_content_yields_empty_envelope() {
        let response =
            parse_fixture(r#"{ "candidates": [{ "finishReason": "MAX_TOKENS" }] }"#).unwrap();
        assert!(response.envelope.text_parts.is_empty());
        assert_eq!(response.finish_reason, FinishReason::Length);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Status mapping
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn status_codes_map_to_errors() {
        assert!(matches!(
            status_error(400, "bad".into()),
            AIError::InvalidRequest(_)
        ));
        assert!(matches!(
            status_error(403, String::new()),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            status_error(503, String::new()),
            AIError::Unavailable { .. }
        ));
        assert!(matches!(status_error(418, String::new()), AIError::Network(_)));
    }

    #[test]
    fn rate_limit_reads_retry_delay() {
        let body = r#"{ "error": { "code": 429, "details": [
            { "@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "17s" }
        ]}}"#;
        assert!(matches!(
            status_error(429, body.into()),
            AIError::RateLimited { retry_after_secs: 17 }
        ));
        assert!(matches!(
            status_error(429, "not json".into()),
            AIError::RateLimited { retry_after_secs: 30 }
        ));
    }
}
