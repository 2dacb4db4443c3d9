//! The shared tag pool.
//!
//! Names are unique case-insensitively. Both manual additions and AI
//! suggestions go through this pool, so a name never ends up with two
//! colors.

use serde::{Deserialize, Serialize};

use crate::domain::content::{Tag, NEUTRAL_TAG_COLOR};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagPool {
    tags: Vec<Tag>,
}

impl TagPool {
    pub fn new(tags: Vec<Tag>) -> Self {
        let mut pool = Self::default();
        pool.absorb(tags);
        pool
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.has_name(name))
    }

    /// Returns the existing tag with this name, or mints one with the
    /// neutral color.
    pub fn resolve_or_mint(&mut self, name: &str) -> Tag {
        if let Some(existing) = self.find(name) {
            return existing.clone();
        }
        let tag = Tag::mint(name.trim(), NEUTRAL_TAG_COLOR);
        self.tags.push(tag.clone());
        tag
    }

    /// Merges suggested tags, skipping names already in the pool. Returns
    /// the tags that were added.
    pub fn absorb(&mut self, suggested: impl IntoIterator<Item = Tag>) -> Vec<Tag> {
        let mut added = Vec::new();
        for tag in suggested {
            if tag.name.trim().is_empty() || self.find(&tag.name).is_some() {
                continue;
            }
            self.tags.push(tag.clone());
            added.push(tag);
        }
        added
    }
}
