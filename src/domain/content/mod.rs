//! Content domain - the vocabulary of AI-generated dashboard content.
//!
//! - Request/result types for the nine operation kinds
//! - `prompts` - renders a prompt and capability set per operation
//! - `interpreter` - turns a raw model envelope into a typed result
//! - `fallback` - the substitute result per operation

mod book;
mod capability;
mod chat;
mod envelope;
pub mod fallback;
mod health;
mod intelligence;
pub mod interpreter;
mod mission;
mod operation;
pub mod prompts;
mod regenerative;
mod report;
mod score;
mod section;
mod tag;

pub use book::Book;
pub use capability::{
    Capability, FunctionCall, ToolDefinition, NAVIGATE_TO_SECTION, NAVIGATION_TOOL, SECTION_ID_ARG,
};
pub use chat::{
    AgentAction, ChatContext, ChatReply, GroundingSource, IntegrationKind, IntegrationState,
    IntegrationStatus, MemoryFact, MemoryKind,
};
pub use envelope::{GroundingChunk, ModelEnvelope};
pub use fallback::FallbackCause;
pub use health::HealthMetrics;
pub use intelligence::{IntelligenceResult, StakeholderScores};
pub use interpreter::InterpretError;
pub use mission::{Mission, MissionKind};
pub use operation::{OperationKind, OperationOutcome, OperationRequest, ResponseFormat};
pub use prompts::Prompt;
pub use regenerative::{LayerName, RegenerativeLayer};
pub use report::{ReportFramework, ReportParams};
pub use score::Score;
pub use section::SectionId;
pub use tag::{Tag, NEUTRAL_TAG_COLOR};
