//! The dashboard's whole mutable state, owned by the top-level caller.
//!
//! The content service never sees this object. The caller feeds service
//! results in through the methods below.

use super::charity::CharityProject;
use super::errors::{TranscriptError, WorkspaceError};
use super::infrastructure::{InfrastructureTrack, ToggleOutcome};
use super::mission_board::MissionBoard;
use super::tag_pool::TagPool;
use super::transcript::{ChatMessage, ChatTranscript};
use super::user::UserState;
use crate::domain::content::{
    AgentAction, ChatContext, ChatReply, Mission, MissionKind, SectionId, Tag,
};
use crate::domain::foundation::{MissionId, ProjectId, TagId, TaskId, TrackId};

/// Coins granted for generating a book guide.
pub const BOOK_GUIDE_REWARD: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppState {
    pub user: UserState,
    pub tags: TagPool,
    pub missions: MissionBoard,
    pub tracks: Vec<InfrastructureTrack>,
    pub charities: Vec<CharityProject>,
    pub transcript: ChatTranscript,
    pub active_section: SectionId,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(UserState::demo())
    }
}

impl AppState {
    /// Seeded dashboard state for `user`.
    pub fn new(user: UserState) -> Self {
        Self {
            user,
            tags: TagPool::new(vec![Tag::new(
                TagId::new("t1"),
                "策略",
                "bg-blue-100 text-blue-700",
            )]),
            missions: MissionBoard::new(vec![
                Mission::daily("每日碳排紀錄", "填寫數據", 50).with_id(MissionId::new("1")),
                Mission::daily("Salon 共讀", "發表心得", 100)
                    .with_id(MissionId::new("2"))
                    .with_kind(MissionKind::Learning),
            ]),
            tracks: InfrastructureTrack::starter_tracks(),
            charities: CharityProject::catalog(),
            transcript: ChatTranscript::new(),
            active_section: SectionId::default(),
        }
    }

    /// Context for the next chat call.
    pub fn chat_context(&self) -> ChatContext {
        ChatContext::new(self.active_section, self.user.role.clone())
            .with_memory(self.user.memory.clone())
            .with_integrations(self.user.integrations.clone())
    }

    /// Marks a mission done and credits its reward. Returns the new balance.
    pub fn complete_mission(&mut self, id: &MissionId) -> Result<u64, WorkspaceError> {
        let reward = self.missions.complete(id)?;
        Ok(self.user.credit(reward.max(0) as u64))
    }

    /// Toggles an infrastructure task, crediting any completion bonus.
    pub fn toggle_task(
        &mut self,
        track_id: &TrackId,
        task_id: &TaskId,
    ) -> Result<ToggleOutcome, WorkspaceError> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| &t.id == track_id)
            .ok_or_else(|| WorkspaceError::TrackNotFound(track_id.clone()))?;

        let outcome = track.toggle_task(task_id)?;
        if outcome.bonus > 0 {
            self.user.credit(outcome.bonus);
        }
        Ok(outcome)
    }

    /// Moves coins from the user to a charity project. Returns the new balance.
    pub fn donate(&mut self, project_id: &ProjectId, amount: u64) -> Result<u64, WorkspaceError> {
        let project = self
            .charities
            .iter_mut()
            .find(|p| &p.id == project_id)
            .ok_or_else(|| WorkspaceError::ProjectNotFound(project_id.clone()))?;

        let balance = self.user.spend(amount)?;
        project.receive(amount);
        Ok(balance)
    }

    pub fn reward_book_guide(&mut self) -> u64 {
        self.user.credit(BOOK_GUIDE_REWARD)
    }

    /// Performs an action from a chat reply. Returns whether anything changed.
    pub fn apply_action(&mut self, action: &AgentAction) -> bool {
        match action {
            AgentAction::Navigate { tab_id } => {
                let changed = self.active_section != *tab_id;
                self.active_section = *tab_id;
                changed
            }
            AgentAction::RefineReport { .. } | AgentAction::AnalyzeData { .. } => false,
        }
    }

    /// Appends a reply to the transcript and applies its action.
    pub fn receive_chat_reply(&mut self, reply: &ChatReply) -> Result<ChatMessage, TranscriptError> {
        let message = self.transcript.complete_turn(reply)?.clone();
        if let Some(action) = &reply.action {
            self.apply_action(action);
        }
        Ok(message)
    }
}
