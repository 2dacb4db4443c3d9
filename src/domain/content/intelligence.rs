//! Intelligence (trend research) results.

use serde::{Deserialize, Serialize};

use super::chat::GroundingSource;
use super::score::Score;
use super::tag::Tag;

/// Stakeholder stance scores on the five fixed axes.
///
/// An axis the model left out stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderScores {
    #[serde(default)]
    pub government: Option<Score>,
    #[serde(default)]
    pub ngo: Option<Score>,
    #[serde(default)]
    pub investors: Option<Score>,
    #[serde(default)]
    pub supply_chain: Option<Score>,
    #[serde(default)]
    pub consumers: Option<Score>,
}

impl StakeholderScores {
    /// Axis names, in wire order.
    pub const AXES: [&'static str; 5] =
        ["government", "ngo", "investors", "supplyChain", "consumers"];

    /// Every axis present with the same value.
    pub fn uniform(score: Score) -> Self {
        Self {
            government: Some(score),
            ngo: Some(score),
            investors: Some(score),
            supply_chain: Some(score),
            consumers: Some(score),
        }
    }

    /// `(axis, score)` pairs in wire order.
    pub fn axes(&self) -> [(&'static str, Option<Score>); 5] {
        [
            ("government", self.government),
            ("ngo", self.ngo),
            ("investors", self.investors),
            ("supplyChain", self.supply_chain),
            ("consumers", self.consumers),
        ]
    }
}

/// Result of researching a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelligenceResult {
    pub topic: String,
    pub sentiment: Option<Score>,
    pub stakeholders: StakeholderScores,
    /// Usually three short insights; may be empty.
    pub insights: Vec<String>,
    pub tags: Vec<Tag>,
    /// Web citations from search grounding, in model order.
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

impl IntelligenceResult {
    /// Attaches tags, e.g. the output of a tag suggestion call.
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }
}
