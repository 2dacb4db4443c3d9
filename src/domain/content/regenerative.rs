//! Regenerative ESG model layers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::score::Score;

/// The five layers of the regenerative model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerName {
    #[serde(alias = "philosophy")]
    Philosophy,
    #[serde(alias = "strategy")]
    Strategy,
    #[serde(alias = "innovation")]
    Innovation,
    #[serde(alias = "learning")]
    Learning,
    #[serde(alias = "regeneration")]
    Regeneration,
}

impl LayerName {
    pub const ALL: [LayerName; 5] = [
        LayerName::Philosophy,
        LayerName::Strategy,
        LayerName::Innovation,
        LayerName::Learning,
        LayerName::Regeneration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerName::Philosophy => "Philosophy",
            LayerName::Strategy => "Strategy",
            LayerName::Innovation => "Innovation",
            LayerName::Learning => "Learning",
            LayerName::Regeneration => "Regeneration",
        }
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored layer of a regenerative analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerativeLayer {
    pub layer: LayerName,
    #[serde(default)]
    pub score: Option<Score>,
    #[serde(default)]
    pub analysis: Option<String>,
}
