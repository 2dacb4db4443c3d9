//! Chat assistant vocabulary: context in, reply and actions out.

use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::section::SectionId;
use crate::domain::foundation::{FactId, Timestamp};

/// Kind of fact the assistant has been asked to remember.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Preference,
    Context,
    Decision,
}

/// A remembered fact fed back into chat prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryFact {
    pub id: FactId,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub kind: MemoryKind,
}

impl MemoryFact {
    pub fn new(content: impl Into<String>, kind: MemoryKind) -> Self {
        Self {
            id: FactId::generate(),
            content: content.into(),
            timestamp: Timestamp::now(),
            kind,
        }
    }
}

/// External backends the dashboard can be connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    Flowlu,
    Bluecc,
}

impl IntegrationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationKind::Flowlu => "flowlu",
            IntegrationKind::Bluecc => "bluecc",
        }
    }
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection status of one integration.
#[derive(Debug, Clone, Default)]
pub struct IntegrationStatus {
    pub connected: bool,
    pub api_key: Option<Secret<String>>,
    pub domain: Option<String>,
    pub last_sync: Option<Timestamp>,
}

/// Connection status of every integration.
#[derive(Debug, Clone, Default)]
pub struct IntegrationState {
    pub flowlu: IntegrationStatus,
    pub bluecc: IntegrationStatus,
}

impl IntegrationState {
    pub fn get(&self, kind: IntegrationKind) -> &IntegrationStatus {
        match kind {
            IntegrationKind::Flowlu => &self.flowlu,
            IntegrationKind::Bluecc => &self.bluecc,
        }
    }

    pub fn get_mut(&mut self, kind: IntegrationKind) -> &mut IntegrationStatus {
        match kind {
            IntegrationKind::Flowlu => &mut self.flowlu,
            IntegrationKind::Bluecc => &mut self.bluecc,
        }
    }

    /// Integrations currently connected, in a fixed order.
    pub fn connected(&self) -> Vec<IntegrationKind> {
        [IntegrationKind::Flowlu, IntegrationKind::Bluecc]
            .into_iter()
            .filter(|kind| self.get(*kind).connected)
            .collect()
    }
}

/// Everything the assistant is told about the user's situation.
#[derive(Debug, Clone, Default)]
pub struct ChatContext {
    pub active_section: SectionId,
    pub user_role: String,
    pub memory: Vec<MemoryFact>,
    pub integrations: IntegrationState,
}

impl ChatContext {
    pub fn new(active_section: SectionId, user_role: impl Into<String>) -> Self {
        Self {
            active_section,
            user_role: user_role.into(),
            ..Default::default()
        }
    }

    pub fn with_memory(mut self, memory: Vec<MemoryFact>) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_integrations(mut self, integrations: IntegrationState) -> Self {
        self.integrations = integrations;
        self
    }
}

/// A web citation attached to a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// A side effect the caller should perform after a chat reply.
///
/// Only `Navigate` is produced today; the other kinds are reserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentAction {
    Navigate {
        #[serde(rename = "tabId")]
        tab_id: SectionId,
    },
    RefineReport {
        instruction: String,
    },
    AnalyzeData {
        topic: String,
    },
}

/// The assistant's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<AgentAction>,
}

impl ChatReply {
    /// A plain text reply with no sources or action.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
            action: None,
        }
    }
}
