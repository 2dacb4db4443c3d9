//! Infrastructure tracks: checklists whose progress is derived from
//! completed tasks.

use serde::{Deserialize, Serialize};

use super::errors::WorkspaceError;
use crate::domain::foundation::{Percentage, TaskId, TrackId};

/// Coins granted the first time a track reaches 100%.
pub const TRACK_COMPLETION_BONUS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureTask {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// Question to put to the assistant for help with this task.
    pub ai_help: String,
}

impl InfrastructureTask {
    pub fn new(id: impl Into<String>, title: impl Into<String>, ai_help: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(id),
            title: title.into(),
            completed: false,
            ai_help: ai_help.into(),
        }
    }

    pub fn done(mut self) -> Self {
        self.completed = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureTrack {
    pub id: TrackId,
    pub title: String,
    pub tasks: Vec<InfrastructureTask>,
    progress: Percentage,
    bonus_awarded: bool,
}

/// What a toggle changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub progress: Percentage,
    /// Coins earned by this toggle.
    pub bonus: u64,
}

impl InfrastructureTrack {
    pub fn new(id: impl Into<String>, title: impl Into<String>, tasks: Vec<InfrastructureTask>) -> Self {
        let progress = Self::derive_progress(&tasks);
        Self {
            id: TrackId::new(id),
            title: title.into(),
            tasks,
            progress,
            bonus_awarded: progress == Percentage::HUNDRED,
        }
    }

    pub fn progress(&self) -> Percentage {
        self.progress
    }

    /// Flips a task and recomputes progress. The completion bonus is paid
    /// only the first time the track reaches 100%.
    pub fn toggle_task(&mut self, task_id: &TaskId) -> Result<ToggleOutcome, WorkspaceError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == task_id)
            .ok_or_else(|| WorkspaceError::TaskNotFound {
                track: self.id.clone(),
                task: task_id.clone(),
            })?;
        task.completed = !task.completed;

        self.progress = Self::derive_progress(&self.tasks);

        let bonus = if self.progress == Percentage::HUNDRED && !self.bonus_awarded {
            self.bonus_awarded = true;
            TRACK_COMPLETION_BONUS
        } else {
            0
        };

        Ok(ToggleOutcome {
            progress: self.progress,
            bonus,
        })
    }

    fn derive_progress(tasks: &[InfrastructureTask]) -> Percentage {
        let done = tasks.iter().filter(|t| t.completed).count();
        Percentage::ratio(done, tasks.len())
    }

    /// The two starter tracks.
    pub fn starter_tracks() -> Vec<InfrastructureTrack> {
        vec![
            InfrastructureTrack::new(
                "t1",
                "行政優化",
                vec![
                    InfrastructureTask::new("1", "導入電子簽核", "如何評估電子簽核供應商？").done(),
                    InfrastructureTask::new("2", "文件無紙化流程", "無紙化過渡期的管理策略"),
                ],
            ),
            InfrastructureTrack::new(
                "t2",
                "治理架構",
                vec![
                    InfrastructureTask::new("3", "成立 ESG 委員會", "ESG 委員會的職權範疇範本"),
                    InfrastructureTask::new("4", "利害關係人議合機制", "如何設計議合問卷？"),
                ],
            ),
        ]
    }
}
