//! Strongly-typed identifier value objects.
//!
//! Identifiers are opaque strings: the dashboard seeds some records with
//! short hand-written ids (`"t1"`, `"m1"`), while anything minted at runtime
//! gets a random UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Mints a fresh, globally unique identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a tag in the shared tag pool.
    TagId
);

opaque_id!(
    /// Identifier of an academy mission.
    MissionId
);

opaque_id!(
    /// Identifier of a chat transcript message.
    MessageId
);

opaque_id!(
    /// Identifier of a remembered fact.
    FactId
);

opaque_id!(
    /// Identifier of an infrastructure track.
    TrackId
);

opaque_id!(
    /// Identifier of a task within an infrastructure track.
    TaskId
);

opaque_id!(
    /// Identifier of a charity project.
    ProjectId
);

opaque_id!(
    /// Identifier of an inventory item.
    ItemId
);
