//! ESG report drafting inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tag::Tag;
use crate::domain::foundation::ValidationError;

/// Disclosure framework a report is written against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportFramework {
    #[default]
    Gri,
    Sasb,
    Tcfd,
    Issb,
}

impl ReportFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFramework::Gri => "GRI",
            ReportFramework::Sasb => "SASB",
            ReportFramework::Tcfd => "TCFD",
            ReportFramework::Issb => "ISSB",
        }
    }
}

impl fmt::Display for ReportFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFramework {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GRI" => Ok(ReportFramework::Gri),
            "SASB" => Ok(ReportFramework::Sasb),
            "TCFD" => Ok(ReportFramework::Tcfd),
            "ISSB" => Ok(ReportFramework::Issb),
            other => Err(ValidationError::invalid_format(
                "framework",
                format!("unsupported framework '{}'", other),
            )),
        }
    }
}

/// Parameters for a report draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub company_name: String,
    pub industry: String,
    pub framework: ReportFramework,
    pub raw_data: String,
    pub selected_sections: Vec<String>,
    pub tags: Vec<Tag>,
}

impl ReportParams {
    /// Creates parameters for a company; the remaining fields start empty.
    pub fn new(company_name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            industry: industry.into(),
            ..Default::default()
        }
    }

    pub fn with_framework(mut self, framework: ReportFramework) -> Self {
        self.framework = framework;
        self
    }

    pub fn with_raw_data(mut self, raw_data: impl Into<String>) -> Self {
        self.raw_data = raw_data.into();
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.selected_sections.push(section.into());
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }
}
