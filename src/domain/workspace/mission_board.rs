//! Academy missions held by the caller.

use serde::{Deserialize, Serialize};

use super::errors::WorkspaceError;
use crate::domain::content::Mission;
use crate::domain::foundation::MissionId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionBoard {
    missions: Vec<Mission>,
}

impl MissionBoard {
    pub fn new(missions: Vec<Mission>) -> Self {
        Self { missions }
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// Swaps in a freshly generated batch.
    pub fn replace(&mut self, batch: Vec<Mission>) {
        self.missions = batch;
    }

    /// Marks a mission done and returns its reward.
    pub fn complete(&mut self, id: &MissionId) -> Result<i64, WorkspaceError> {
        let mission = self
            .missions
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| WorkspaceError::MissionNotFound(id.clone()))?;

        if mission.completed {
            return Err(WorkspaceError::MissionAlreadyCompleted(id.clone()));
        }
        mission.completed = true;
        Ok(mission.reward)
    }

    pub fn open_count(&self) -> usize {
        self.missions.iter().filter(|m| !m.completed).count()
    }
}
