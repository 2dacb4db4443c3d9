//! Tags shared across reports, intelligence results and missions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::TagId;

/// Style token given to tags minted without an explicit color.
pub const NEUTRAL_TAG_COLOR: &str = "bg-slate-100 text-slate-600";

/// A labelled tag.
///
/// Identity is the id. `color` is a presentation style token and carries no
/// meaning; name uniqueness is the tag pool's concern, not the tag's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
}

impl Tag {
    /// Creates a tag with an explicit id.
    pub fn new(id: TagId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }

    /// Creates a tag with a freshly generated id.
    pub fn mint(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::new(TagId::generate(), name, color)
    }

    /// Case-insensitive name comparison.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
