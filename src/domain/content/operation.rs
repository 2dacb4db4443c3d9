//! Operation kinds handled by the content service.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::book::Book;
use super::chat::{ChatContext, ChatReply};
use super::health::HealthMetrics;
use super::intelligence::IntelligenceResult;
use super::mission::Mission;
use super::regenerative::RegenerativeLayer;
use super::report::ReportParams;
use super::tag::Tag;

/// Output format requested from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text (possibly Markdown).
    Text,
    /// A JSON document.
    Json,
}

/// Discriminant of [`OperationRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Diagnose,
    BookGuide,
    DailyMissions,
    TagSuggestion,
    Chat,
    ReportDraft,
    ReportRefine,
    IntelligenceAnalysis,
    RegenerativeAnalysis,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Diagnose => "diagnose",
            OperationKind::BookGuide => "book_guide",
            OperationKind::DailyMissions => "daily_missions",
            OperationKind::TagSuggestion => "tag_suggestion",
            OperationKind::Chat => "chat",
            OperationKind::ReportDraft => "report_draft",
            OperationKind::ReportRefine => "report_refine",
            OperationKind::IntelligenceAnalysis => "intelligence_analysis",
            OperationKind::RegenerativeAnalysis => "regenerative_analysis",
        }
    }

    /// Whether the operation expects a JSON document back.
    pub fn response_format(&self) -> ResponseFormat {
        match self {
            OperationKind::DailyMissions
            | OperationKind::TagSuggestion
            | OperationKind::IntelligenceAnalysis
            | OperationKind::RegenerativeAnalysis => ResponseFormat::Json,
            _ => ResponseFormat::Text,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed request for AI-generated content.
#[derive(Debug, Clone)]
pub enum OperationRequest {
    Diagnose(HealthMetrics),
    BookGuide(Book),
    DailyMissions { level: u32 },
    TagSuggestion { content: String, existing: Vec<Tag> },
    Chat { message: String, context: ChatContext },
    ReportDraft(ReportParams),
    ReportRefine { report: String, instruction: String },
    IntelligenceAnalysis { topic: String },
    RegenerativeAnalysis { context: String },
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Diagnose(_) => OperationKind::Diagnose,
            OperationRequest::BookGuide(_) => OperationKind::BookGuide,
            OperationRequest::DailyMissions { .. } => OperationKind::DailyMissions,
            OperationRequest::TagSuggestion { .. } => OperationKind::TagSuggestion,
            OperationRequest::Chat { .. } => OperationKind::Chat,
            OperationRequest::ReportDraft(_) => OperationKind::ReportDraft,
            OperationRequest::ReportRefine { .. } => OperationKind::ReportRefine,
            OperationRequest::IntelligenceAnalysis { .. } => OperationKind::IntelligenceAnalysis,
            OperationRequest::RegenerativeAnalysis { .. } => OperationKind::RegenerativeAnalysis,
        }
    }
}

/// The typed result of an operation, success or fallback alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum OperationOutcome {
    Diagnosis(String),
    BookGuide(String),
    Missions(Vec<Mission>),
    Tags(Vec<Tag>),
    Chat(ChatReply),
    Report(String),
    Intelligence(IntelligenceResult),
    Regenerative(Vec<RegenerativeLayer>),
}
