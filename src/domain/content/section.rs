//! Navigable dashboard sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A top-level section (tab) of the dashboard.
///
/// This is the closed set offered to the model through the navigation
/// function; anything else is rejected before it becomes an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    #[default]
    Dashboard,
    Health,
    Services,
    Intelligence,
    NetZero,
    Report,
    Regenerative,
    Academy,
    Salon,
    About,
}

impl SectionId {
    /// Every section, in declaration order.
    pub const ALL: [SectionId; 10] = [
        SectionId::Dashboard,
        SectionId::Health,
        SectionId::Services,
        SectionId::Intelligence,
        SectionId::NetZero,
        SectionId::Report,
        SectionId::Regenerative,
        SectionId::Academy,
        SectionId::Salon,
        SectionId::About,
    ];

    /// Returns the wire identifier of the section.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "dashboard",
            SectionId::Health => "health",
            SectionId::Services => "services",
            SectionId::Intelligence => "intelligence",
            SectionId::NetZero => "netzero",
            SectionId::Report => "report",
            SectionId::Regenerative => "regenerative",
            SectionId::Academy => "academy",
            SectionId::Salon => "salon",
            SectionId::About => "about",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("section", format!("unknown section '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_section() {
        for section in SectionId::ALL {
            assert_eq!(section.as_str().parse::<SectionId>().unwrap(), section);
        }
    }

    #[test]
    fn rejects_unknown_and_differently_cased_ids() {
        assert!("lobby".parse::<SectionId>().is_err());
        assert!("NetZero".parse::<SectionId>().is_err());
        assert!("".parse::<SectionId>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SectionId::NetZero).unwrap(), "\"netzero\"");
        let parsed: SectionId = serde_json::from_str("\"salon\"").unwrap();
        assert_eq!(parsed, SectionId::Salon);
    }
}
