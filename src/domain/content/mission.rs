//! Academy missions.

use serde::{Deserialize, Serialize};

use super::tag::Tag;
use crate::domain::foundation::MissionId;

/// Category of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionKind {
    Daily,
    Project,
    Learning,
}

/// A mission the user can complete for a coin reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub title: String,
    pub desc: String,
    pub reward: i64,
    pub completed: bool,
    #[serde(rename = "type")]
    pub kind: MissionKind,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Mission {
    /// Creates an open daily mission with a fresh id.
    pub fn daily(title: impl Into<String>, desc: impl Into<String>, reward: i64) -> Self {
        Self {
            id: MissionId::generate(),
            title: title.into(),
            desc: desc.into(),
            reward,
            completed: false,
            kind: MissionKind::Daily,
            tags: Vec::new(),
        }
    }

    /// Sets the mission kind.
    pub fn with_kind(mut self, kind: MissionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replaces the id.
    pub fn with_id(mut self, id: MissionId) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_missions_start_open() {
        let mission = Mission::daily("零廢棄午餐", "紀錄垃圾量", 100);
        assert!(!mission.completed);
        assert_eq!(mission.kind, MissionKind::Daily);
        assert_eq!(mission.reward, 100);
    }

    #[test]
    fn kind_serializes_under_type_key() {
        let mission = Mission::daily("a", "b", 50)
            .with_id(MissionId::new("m1"))
            .with_kind(MissionKind::Learning);
        let json = serde_json::to_value(&mission).unwrap();
        assert_eq!(json["type"], "learning");
        assert_eq!(json["id"], "m1");
        assert_eq!(json["completed"], false);
    }
}
