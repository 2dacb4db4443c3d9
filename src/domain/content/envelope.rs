//! The raw response envelope returned by a model call.

use serde::{Deserialize, Serialize};

use super::capability::FunctionCall;

/// One grounding chunk as reported by the model.
///
/// Chunks that are not web results carry no URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl GroundingChunk {
    pub fn web(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            uri: Some(uri.into()),
        }
    }
}

/// Uninterpreted model output: text parts, grounding and at most one
/// function call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelEnvelope {
    pub text_parts: Vec<String>,
    pub grounding: Vec<GroundingChunk>,
    pub function_call: Option<FunctionCall>,
}

impl ModelEnvelope {
    /// An envelope holding a single text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::default().with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_parts.push(text.into());
        self
    }

    pub fn with_grounding(mut self, chunk: GroundingChunk) -> Self {
        self.grounding.push(chunk);
        self
    }

    pub fn with_function_call(mut self, call: FunctionCall) -> Self {
        self.function_call = Some(call);
        self
    }

    /// All text parts joined, empty when there are none.
    pub fn text(&self) -> String {
        self.text_parts.concat()
    }

    /// The first non-empty text part.
    pub fn first_text(&self) -> Option<&str> {
        self.text_parts
            .iter()
            .map(String::as_str)
            .find(|part| !part.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_parts_in_order() {
        let envelope = ModelEnvelope::from_text("[1,").with_text("2]");
        assert_eq!(envelope.text(), "[1,2]");
    }

    #[test]
    fn first_text_skips_empty_parts() {
        let envelope = ModelEnvelope::from_text("").with_text("hello").with_text("world");
        assert_eq!(envelope.first_text(), Some("hello"));
        assert_eq!(ModelEnvelope::default().first_text(), None);
    }
}
