//! Append-only chat transcript with at most one pending turn.

use serde::{Deserialize, Serialize};

use super::errors::TranscriptError;
use crate::domain::content::{ChatReply, GroundingSource};
use crate::domain::foundation::{MessageId, Timestamp};

pub const ASSISTANT_GREETING: &str = "您好，我是 JunAi。";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<GroundingSource>,
}

impl ChatMessage {
    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            text: text.into(),
            timestamp: Timestamp::now(),
            sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    /// A transcript opened with the assistant's greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Model, ASSISTANT_GREETING)],
            pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Appends the user's message and marks a reply as pending.
    pub fn begin_turn(&mut self, text: &str) -> Result<&ChatMessage, TranscriptError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranscriptError::EmptyMessage);
        }
        if self.pending {
            return Err(TranscriptError::TurnPending);
        }

        self.pending = true;
        self.push(ChatMessage::new(ChatRole::User, text))
    }

    /// Appends the model's reply and clears the pending flag.
    pub fn complete_turn(&mut self, reply: &ChatReply) -> Result<&ChatMessage, TranscriptError> {
        if !self.pending {
            return Err(TranscriptError::NoPendingTurn);
        }

        self.pending = false;
        let mut message = ChatMessage::new(ChatRole::Model, reply.text.clone());
        message.sources = reply.sources.clone();
        self.push(message)
    }

    fn push(&mut self, message: ChatMessage) -> Result<&ChatMessage, TranscriptError> {
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }
}
