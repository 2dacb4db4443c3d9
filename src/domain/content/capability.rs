//! Capability declarations offered to the model.
//!
//! A call can offer the model web-search grounding and/or functions it may
//! ask the caller to run. The model answers a function with a
//! [`FunctionCall`]; interpreting that call is up to the response
//! interpreter.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::section::SectionId;

/// Name of the navigation function declared on chat calls.
pub const NAVIGATE_TO_SECTION: &str = "navigate_to_section";

/// Argument of the navigation function carrying the target section.
pub const SECTION_ID_ARG: &str = "sectionId";

/// Definition of a function the model may call.
///
/// # Examples
///
/// ```
/// use esg_sunshine::domain::content::ToolDefinition;
///
/// let definition = ToolDefinition::new(
///     "lookup_supplier",
///     "Look up a supplier by name",
///     serde_json::json!({
///         "type": "object",
///         "properties": { "name": { "type": "string" } },
///         "required": ["name"]
///     }),
/// );
/// assert_eq!(definition.name(), "lookup_supplier");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the function (e.g., "navigate_to_section")
    name: String,

    /// Human-readable description for the model
    description: String,

    /// JSON Schema for the parameters
    parameters_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Creates a new function definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_schema,
        }
    }

    /// Returns the function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameters schema.
    pub fn parameters_schema(&self) -> &serde_json::Value {
        &self.parameters_schema
    }

    /// Converts to a Gemini `functionDeclarations` entry.
    pub fn to_gemini_format(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters_schema
        })
    }
}

/// The navigation function, restricted to the known sections.
pub static NAVIGATION_TOOL: Lazy<ToolDefinition> = Lazy::new(|| {
    let sections: Vec<&str> = SectionId::ALL.iter().map(SectionId::as_str).collect();
    ToolDefinition::new(
        NAVIGATE_TO_SECTION,
        "Navigate the user to a specific section (tab) of the application.",
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                SECTION_ID_ARG: {
                    "type": "STRING",
                    "enum": sections
                }
            },
            "required": [SECTION_ID_ARG]
        }),
    )
});

/// A capability declared on a model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Let the model ground its answer with web search.
    WebSearch,
    /// Offer the model a callable function.
    Function(ToolDefinition),
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to invoke
    name: String,

    /// Arguments (JSON object)
    args: serde_json::Value,
}

impl FunctionCall {
    /// Creates a new function call.
    pub fn new(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Returns the function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the arguments.
    pub fn args(&self) -> &serde_json::Value {
        &self.args
    }

    /// Returns a string argument, if present.
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(|v| v.as_str())
    }
}
