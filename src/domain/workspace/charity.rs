//! Charity projects funded with earned coins.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Percentage, ProjectId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharityProject {
    pub id: ProjectId,
    pub title: String,
    pub target: u64,
    pub raised: u64,
    pub desc: String,
}

impl CharityProject {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        target: u64,
        raised: u64,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            id: ProjectId::new(id),
            title: title.into(),
            target,
            raised,
            desc: desc.into(),
        }
    }

    /// Raised share of the target, rounded; capped at 100.
    pub fn funded_percentage(&self) -> Percentage {
        Percentage::ratio(self.raised as usize, self.target as usize)
    }

    pub(crate) fn receive(&mut self, amount: u64) {
        self.raised = self.raised.saturating_add(amount);
    }

    pub fn catalog() -> Vec<CharityProject> {
        vec![
            CharityProject::new("c1", "百萬植樹計畫", 50_000, 32_450, "在都市周邊建立生態廊道。"),
            CharityProject::new("c2", "偏鄉數位教育", 20_000, 18_900, "提供偏鄉學童平板與程式課程。"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funded_percentage_rounds() {
        let catalog = CharityProject::catalog();
        assert_eq!(catalog[0].funded_percentage().value(), 65);
        assert_eq!(catalog[1].funded_percentage().value(), 95);
    }

    #[test]
    fn overfunded_project_caps_at_hundred() {
        let project = CharityProject::new("x", "x", 100, 250, "");
        assert_eq!(project.funded_percentage(), Percentage::HUNDRED);
    }

    #[test]
    fn zero_target_is_zero_percent() {
        let project = CharityProject::new("x", "x", 0, 10, "");
        assert_eq!(project.funded_percentage(), Percentage::ZERO);
    }
}
