//! Errors raised by workspace state transitions.

use thiserror::Error;

use crate::domain::foundation::{MissionId, ProjectId, TaskId, TrackId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("Insufficient coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Mission not found: {0}")]
    MissionNotFound(MissionId),

    #[error("Mission already completed: {0}")]
    MissionAlreadyCompleted(MissionId),

    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    #[error("Task {task} not found in track {track}")]
    TaskNotFound { track: TrackId, task: TaskId },

    #[error("Charity project not found: {0}")]
    ProjectNotFound(ProjectId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("A reply is already pending")]
    TurnPending,

    #[error("No turn is waiting for a reply")]
    NoPendingTurn,
}
