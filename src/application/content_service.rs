//! ContentService - one entry point per AI-backed content operation.
//!
//! Each operation builds a prompt, reads the credential, invokes the model
//! once and interprets the envelope. Internally that is a
//! `Result<T, GenerationFailure>`; at the public boundary any failure is
//! replaced by the operation's fallback value, so callers always receive a
//! renderable result.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::content::{
    fallback, interpreter, prompts, Book, ChatContext, ChatReply, FallbackCause, HealthMetrics,
    IntelligenceResult, Mission, ModelEnvelope, OperationKind, OperationOutcome,
    OperationRequest, Prompt, RegenerativeLayer, ReportParams, Tag,
};
use crate::ports::{AIProvider, CredentialSource, GenerationRequest};

use super::failure::GenerationFailure;

/// Façade over the model port. Holds no per-call state.
#[derive(Clone)]
pub struct ContentService {
    provider: Arc<dyn AIProvider>,
    credentials: Arc<dyn CredentialSource>,
}

impl ContentService {
    pub fn new(provider: Arc<dyn AIProvider>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            provider,
            credentials,
        }
    }

    /// Short health diagnosis for the three ESG scores.
    pub async fn diagnose(&self, metrics: &HealthMetrics) -> String {
        let result = self
            .invoke(prompts::diagnose(metrics))
            .await
            .and_then(|env| Ok(interpreter::interpret_text(&env)?));
        settle(OperationKind::Diagnose, result, fallback::diagnosis)
    }

    /// Reading guide for a salon book.
    pub async fn book_guide(&self, book: &Book) -> String {
        let result = self
            .invoke(prompts::book_guide(book))
            .await
            .and_then(|env| Ok(interpreter::interpret_text(&env)?));
        settle(OperationKind::BookGuide, result, fallback::book_guide)
    }

    /// A fresh batch of academy missions.
    pub async fn daily_missions(&self, level: u32) -> Vec<Mission> {
        let result = self
            .invoke(prompts::daily_missions(level))
            .await
            .and_then(|env| Ok(interpreter::interpret_missions(&env)?));
        settle(OperationKind::DailyMissions, result, fallback::daily_missions)
    }

    /// Tags for a piece of content. Names are not checked against
    /// `existing`; consolidation happens in the caller's tag pool.
    pub async fn suggest_tags(&self, content: &str, existing: &[Tag]) -> Vec<Tag> {
        let result = self
            .invoke(prompts::tag_suggestion(content, existing))
            .await
            .and_then(|env| Ok(interpreter::interpret_tags(&env)?));
        settle(OperationKind::TagSuggestion, result, fallback::tag_suggestions)
    }

    /// One assistant turn, with citations and an optional navigation action.
    pub async fn chat(&self, message: &str, context: &ChatContext) -> ChatReply {
        let result = self
            .invoke(prompts::chat(message, context))
            .await
            .map(|env| interpreter::interpret_chat(&env));
        settle(OperationKind::Chat, result, fallback::chat)
    }

    /// Markdown report draft.
    pub async fn draft_report(&self, params: &ReportParams) -> String {
        let result = self
            .invoke(prompts::report_draft(params))
            .await
            .and_then(|env| Ok(interpreter::interpret_text(&env)?));
        settle(OperationKind::ReportDraft, result, fallback::report_draft)
    }

    /// Rewrites a report following an instruction. A blank instruction
    /// returns the report unchanged without calling the model.
    pub async fn refine_report(&self, report: &str, instruction: &str) -> String {
        if instruction.trim().is_empty() {
            tracing::debug!("Blank refine instruction, returning report unchanged");
            return report.to_string();
        }

        let result = self
            .invoke(prompts::report_refine(report, instruction))
            .await
            .and_then(|env| Ok(interpreter::interpret_text(&env)?));
        settle(OperationKind::ReportRefine, result, |cause| {
            fallback::report_refine(report, cause)
        })
    }

    /// Web-grounded stakeholder analysis of a topic.
    pub async fn analyze_intelligence(&self, topic: &str) -> IntelligenceResult {
        let result = self
            .invoke(prompts::intelligence_analysis(topic))
            .await
            .and_then(|env| Ok(interpreter::interpret_intelligence(topic, &env)?));
        settle(OperationKind::IntelligenceAnalysis, result, |cause| {
            fallback::intelligence(topic, cause)
        })
    }

    /// Five-layer regenerative assessment.
    pub async fn analyze_regenerative(&self, context: &str) -> Vec<RegenerativeLayer> {
        let result = self
            .invoke(prompts::regenerative_analysis(context))
            .await
            .and_then(|env| Ok(interpreter::interpret_regenerative(&env)?));
        settle(
            OperationKind::RegenerativeAnalysis,
            result,
            fallback::regenerative,
        )
    }

    /// Runs any operation from its tagged request.
    pub async fn execute(&self, request: OperationRequest) -> OperationOutcome {
        match request {
            OperationRequest::Diagnose(metrics) => {
                OperationOutcome::Diagnosis(self.diagnose(&metrics).await)
            }
            OperationRequest::BookGuide(book) => {
                OperationOutcome::BookGuide(self.book_guide(&book).await)
            }
            OperationRequest::DailyMissions { level } => {
                OperationOutcome::Missions(self.daily_missions(level).await)
            }
            OperationRequest::TagSuggestion { content, existing } => {
                OperationOutcome::Tags(self.suggest_tags(&content, &existing).await)
            }
            OperationRequest::Chat { message, context } => {
                OperationOutcome::Chat(self.chat(&message, &context).await)
            }
            OperationRequest::ReportDraft(params) => {
                OperationOutcome::Report(self.draft_report(&params).await)
            }
            OperationRequest::ReportRefine {
                report,
                instruction,
            } => OperationOutcome::Report(self.refine_report(&report, &instruction).await),
            OperationRequest::IntelligenceAnalysis { topic } => {
                OperationOutcome::Intelligence(self.analyze_intelligence(&topic).await)
            }
            OperationRequest::RegenerativeAnalysis { context } => {
                OperationOutcome::Regenerative(self.analyze_regenerative(&context).await)
            }
        }
    }

    /// Reads the credential and makes the single model call.
    async fn invoke(&self, prompt: Prompt) -> Result<ModelEnvelope, GenerationFailure> {
        let kind = prompt.kind;
        let api_key = self
            .credentials
            .api_key()
            .ok_or(GenerationFailure::NoCredential)?;

        let started = Instant::now();
        let response = self
            .provider
            .generate(GenerationRequest::from_prompt(prompt, api_key))
            .await?;

        tracing::debug!(
            operation = kind.as_str(),
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            latency_ms = started.elapsed().as_millis() as u64,
            "Model call returned"
        );

        Ok(response.envelope)
    }
}

/// Collapses the internal result to a plain value.
fn settle<T>(
    kind: OperationKind,
    result: Result<T, GenerationFailure>,
    fallback: impl FnOnce(FallbackCause) -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(GenerationFailure::NoCredential) => {
            tracing::info!(operation = kind.as_str(), "No API key configured, using fallback");
            fallback(FallbackCause::MissingCredential)
        }
        Err(failure) => {
            tracing::warn!(
                operation = kind.as_str(),
                failure = failure.kind(),
                error = %failure,
                "Content generation failed, using fallback"
            );
            fallback(failure.cause())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::credentials::StaticCredentialSource;
    use crate::domain::content::fallback::{
        ANALYSIS_ERROR_INSIGHT, CONNECTION_ERROR_NOTICE, MISSING_API_KEY_INSIGHT,
        MISSING_API_KEY_NOTICE,
    };
    use crate::domain::content::{
        AgentAction, FunctionCall, GroundingChunk, LayerName, Score, SectionId,
    };
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn service_with(provider: MockAIProvider) -> (ContentService, MockAIProvider) {
        let service = ContentService::new(
            Arc::new(provider.clone()),
            Arc::new(StaticCredentialSource::with_key("test-key")),
        );
        (service, provider)
    }

    fn keyless_service() -> (ContentService, MockAIProvider) {
        let provider = MockAIProvider::new();
        let service = ContentService::new(
            Arc::new(provider.clone()),
            Arc::new(StaticCredentialSource::missing()),
        );
        (service, provider)
    }

    fn metrics() -> HealthMetrics {
        HealthMetrics::new(80, 40, 60).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Missing credential
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn diagnose_without_key_returns_placeholder_without_calling_model() {
        let (service, provider) = keyless_service();

        let text = service.diagnose(&metrics()).await;

        assert_eq!(text, MISSING_API_KEY_NOTICE);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn intelligence_without_key_returns_zeroed_result() {
        let (service, _) = keyless_service();

        let result = service.analyze_intelligence("CBAM").await;

        assert_eq!(result.topic, "CBAM");
        assert_eq!(result.sentiment, Some(Score::ZERO));
        assert!(result
            .stakeholders
            .axes()
            .iter()
            .all(|(_, score)| *score == Some(Score::ZERO)));
        assert_eq!(result.insights, vec![MISSING_API_KEY_INSIGHT.to_string()]);
        assert!(result.tags.is_empty());
    }

    #[tokio::test]
    async fn missions_without_key_are_open_and_unique() {
        let (service, _) = keyless_service();

        let missions = service.daily_missions(1).await;

        assert_eq!(missions.len(), 3);
        let ids: HashSet<_> = missions.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert!(missions.iter().all(|m| !m.completed && m.reward > 0));
    }

    #[tokio::test]
    async fn chat_without_key_asks_for_configuration() {
        let (service, _) = keyless_service();
        let reply = service.chat("你好", &ChatContext::default()).await;
        assert_eq!(reply.text, MISSING_API_KEY_NOTICE);
        assert!(reply.action.is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success paths
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn diagnose_passes_model_text_through() {
        let (service, provider) =
            service_with(MockAIProvider::new().with_text("環境表現優異，社會面需加強。"));

        let text = service.diagnose(&metrics()).await;

        assert_eq!(text, "環境表現優異，社會面需加強。");
        let call = provider.last_call().unwrap();
        assert_eq!(call.kind, OperationKind::Diagnose);
        assert_eq!(call.api_key, "test-key");
    }

    #[tokio::test]
    async fn missions_parse_fenced_json_with_fresh_ids() {
        let (service, _) = service_with(MockAIProvider::new().with_text(
            "```json\n[{\"title\":\"A\",\"desc\":\"a\",\"reward\":10},{\"title\":\"B\",\"desc\":\"b\",\"reward\":20}]\n```",
        ));

        let missions = service.daily_missions(2).await;

        assert_eq!(missions.len(), 2);
        assert_ne!(missions[0].id, missions[1].id);
        assert_eq!(missions[1].reward, 20);
        assert!(missions.iter().all(|m| !m.completed));
    }

    #[tokio::test]
    async fn chat_returns_navigation_and_citations() {
        let envelope = ModelEnvelope::from_text("好的，帶你去淨零頁。")
            .with_function_call(FunctionCall::new(
                "navigate_to_section",
                serde_json::json!({ "sectionId": "netzero" }),
            ))
            .with_grounding(GroundingChunk::web("SBTi", "https://sbti.org"));
        let (service, _) = service_with(MockAIProvider::new().with_envelope(envelope));

        let reply = service.chat("去淨零", &ChatContext::default()).await;

        assert_eq!(
            reply.action,
            Some(AgentAction::Navigate {
                tab_id: SectionId::NetZero
            })
        );
        assert_eq!(reply.sources.len(), 1);
        assert_eq!(reply.sources[0].uri, "https://sbti.org");
    }

    #[tokio::test]
    async fn intelligence_keeps_partial_fields_absent() {
        let (service, _) = service_with(MockAIProvider::new().with_text(
            r#"{"sentiment": 72, "stakeholders": {"government": 80}, "insights": ["a"]}"#,
        ));

        let result = service.analyze_intelligence("CBAM").await;

        assert_eq!(result.sentiment, Some(Score::new(72)));
        assert_eq!(result.stakeholders.government, Some(Score::new(80)));
        assert_eq!(result.stakeholders.ngo, None);
        assert_eq!(result.insights, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn regenerative_layers_parse_in_order() {
        let (service, _) = service_with(MockAIProvider::new().with_text(
            r#"[{"layer":"philosophy","score":70,"analysis":"x"},{"layer":"strategy","score":55,"analysis":"y"}]"#,
        ));

        let layers = service.analyze_regenerative("製造業").await;

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].layer, LayerName::Philosophy);
        assert_eq!(layers[1].score, Some(Score::new(55)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure paths
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn invocation_failure_uses_failure_fallback() {
        let (service, _) = service_with(
            MockAIProvider::new().with_error(MockError::Network {
                message: "reset".into(),
            }),
        );

        let reply = service.chat("你好", &ChatContext::default()).await;

        assert_eq!(reply.text, CONNECTION_ERROR_NOTICE);
    }

    #[tokio::test]
    async fn malformed_json_uses_failure_fallback() {
        let (service, _) = service_with(MockAIProvider::new().with_text("not json at all"));

        let result = service.analyze_intelligence("CBAM").await;

        assert_eq!(result.insights, vec![ANALYSIS_ERROR_INSIGHT.to_string()]);
        assert_eq!(result.sentiment, Some(Score::ZERO));
    }

    #[tokio::test]
    async fn empty_text_uses_failure_fallback() {
        let (service, _) = service_with(MockAIProvider::new().with_text("   "));
        let report = service.draft_report(&ReportParams::new("陽光公司", "製造業")).await;
        assert_eq!(report, fallback::REPORT_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn failed_refine_keeps_original_report() {
        let (service, _) = service_with(
            MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 60 }),
        );

        let refined = service.refine_report("# 報告", "更精簡").await;

        assert_eq!(refined, "# 報告");
    }

    #[tokio::test]
    async fn blank_refine_instruction_skips_the_model() {
        let (service, provider) = service_with(MockAIProvider::new());

        let refined = service.refine_report("# 報告\n內容", "  ").await;

        assert_eq!(refined, "# 報告\n內容");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn execute_dispatches_by_kind() {
        let (service, _) = keyless_service();

        let outcome = service
            .execute(OperationRequest::TagSuggestion {
                content: "太陽能".into(),
                existing: Vec::new(),
            })
            .await;

        match outcome {
            OperationOutcome::Tags(tags) => {
                assert_eq!(tags.len(), 1);
                assert_eq!(tags[0].name, fallback::DEFAULT_TAG_NAME);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn diagnose_fallback_is_never_empty(e in 0i64..=100, s in 0i64..=100, g in 0i64..=100) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let (service, _) = keyless_service();
            let metrics = HealthMetrics::new(e, s, g).unwrap();

            let text = runtime.block_on(service.diagnose(&metrics));

            prop_assert!(!text.is_empty());
        }
    }
}
