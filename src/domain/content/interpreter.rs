//! Response interpreter.
//!
//! Turns a [`ModelEnvelope`] into the typed result of the originating
//! operation. Structured operations go through a tolerant parse: code
//! fences, or prose around an unfenced object or array, are stripped
//! before decoding, and a document that still fails to decode is a total
//! failure (the caller falls back).
//! Fields the model omitted stay absent; nothing here fills defaults.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::capability::{FunctionCall, NAVIGATE_TO_SECTION, SECTION_ID_ARG};
use super::chat::{AgentAction, ChatReply, GroundingSource};
use super::envelope::{GroundingChunk, ModelEnvelope};
use super::intelligence::{IntelligenceResult, StakeholderScores};
use super::mission::Mission;
use super::regenerative::RegenerativeLayer;
use super::score::{lenient_integer, Score};
use super::section::SectionId;
use super::tag::Tag;

/// Text shown when a chat reply carried no text part.
pub const CHAT_THINKING_PLACEHOLDER: &str = "思考中...";

/// Errors raised while interpreting a model response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InterpretError {
    #[error("model returned no content")]
    Empty,

    #[error("JSON parse error: {0}")]
    Json(String),
}

/// Strips Markdown code fences (and any prose around them) from a model
/// response, returning the JSON candidate inside.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };

    // The rest of the opening fence line is a language tag (`json`,
    // `json-ld`) unless the document starts on that line.
    let after_fence = &trimmed[open + 3..];
    let body = match after_fence.find('\n') {
        Some(eol) if !after_fence[..eol].contains(is_json_open) => &after_fence[eol + 1..],
        _ => after_fence.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Locates the JSON document in a model response: fenced block first,
/// otherwise the first balanced object or array in the text.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.contains("```") {
        return strip_code_fences(trimmed);
    }

    let Some(start) = trimmed.find(is_json_open) else {
        return trimmed;
    };
    balanced_span(trimmed, start).unwrap_or(&trimmed[start..])
}

fn is_json_open(c: char) -> bool {
    c == '{' || c == '['
}

/// The slice from `start` through its matching close bracket. Brackets
/// inside string literals are ignored.
fn balanced_span(text: &str, start: usize) -> Option<&str> {
    let tail = &text[start..];
    let (open, close) = match tail.chars().next()? {
        '{' => ('{', '}'),
        _ => ('[', ']'),
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in tail.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&tail[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Decodes a structured response after locating its JSON document.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, InterpretError> {
    let candidate = extract_json(raw);
    if candidate.is_empty() {
        return Err(InterpretError::Empty);
    }
    serde_json::from_str(candidate).map_err(|e| InterpretError::Json(e.to_string()))
}

/// Passes free text through unchanged; blank text is an error so the
/// caller can substitute its fallback string.
pub fn interpret_text(envelope: &ModelEnvelope) -> Result<String, InterpretError> {
    let text = envelope.text();
    if text.trim().is_empty() {
        return Err(InterpretError::Empty);
    }
    Ok(text)
}

#[derive(Debug, Deserialize)]
struct MissionDraft {
    #[serde(default)]
    title: String,
    #[serde(default)]
    desc: String,
    #[serde(deserialize_with = "lenient_integer")]
    reward: i64,
}

/// Missions get fresh ids and start open; the model's own ids are ignored.
pub fn interpret_missions(envelope: &ModelEnvelope) -> Result<Vec<Mission>, InterpretError> {
    let drafts: Vec<MissionDraft> = parse_structured(&envelope.text())?;
    Ok(drafts
        .into_iter()
        .map(|d| Mission::daily(d.title, d.desc, d.reward))
        .collect())
}

#[derive(Debug, Deserialize)]
struct TagDraft {
    name: String,
    #[serde(default)]
    color: String,
}

/// Suggested tags, each with a fresh id. Names are not de-duplicated
/// against the caller's pool here.
pub fn interpret_tags(envelope: &ModelEnvelope) -> Result<Vec<Tag>, InterpretError> {
    let drafts: Vec<TagDraft> = parse_structured(&envelope.text())?;
    Ok(drafts
        .into_iter()
        .map(|d| Tag::mint(d.name, d.color))
        .collect())
}

#[derive(Debug, Deserialize)]
struct IntelligenceDraft {
    #[serde(default)]
    sentiment: Option<Score>,
    #[serde(default)]
    stakeholders: Option<StakeholderScores>,
    #[serde(default)]
    insights: Vec<String>,
}

pub fn interpret_intelligence(
    topic: &str,
    envelope: &ModelEnvelope,
) -> Result<IntelligenceResult, InterpretError> {
    let draft: IntelligenceDraft = parse_structured(&envelope.text())?;
    Ok(IntelligenceResult {
        topic: topic.to_string(),
        sentiment: draft.sentiment,
        stakeholders: draft.stakeholders.unwrap_or_default(),
        insights: draft.insights,
        tags: Vec::new(),
        sources: extract_citations(&envelope.grounding),
    })
}

pub fn interpret_regenerative(
    envelope: &ModelEnvelope,
) -> Result<Vec<RegenerativeLayer>, InterpretError> {
    parse_structured(&envelope.text())
}

/// Web citations in model order. Chunks without a URI are skipped.
pub fn extract_citations(chunks: &[GroundingChunk]) -> Vec<GroundingSource> {
    chunks
        .iter()
        .filter_map(|chunk| {
            let uri = chunk.uri.as_deref().filter(|u| !u.is_empty())?;
            Some(GroundingSource {
                title: chunk.title.clone().unwrap_or_default(),
                uri: uri.to_string(),
            })
        })
        .collect()
}

/// Translates a navigation call into an action. Unknown functions and
/// sections outside [`SectionId::ALL`] yield nothing.
pub fn navigation_action(call: &FunctionCall) -> Option<AgentAction> {
    if call.name() != NAVIGATE_TO_SECTION {
        return None;
    }
    let section = call.str_arg(SECTION_ID_ARG)?;
    match section.parse::<SectionId>() {
        Ok(tab_id) => Some(AgentAction::Navigate { tab_id }),
        Err(err) => {
            tracing::debug!(section, %err, "ignoring navigation to unknown section");
            None
        }
    }
}

/// Chat replies never fail: missing text becomes a placeholder.
pub fn interpret_chat(envelope: &ModelEnvelope) -> ChatReply {
    let text = envelope
        .first_text()
        .unwrap_or(CHAT_THINKING_PLACEHOLDER)
        .to_string();

    ChatReply {
        text,
        sources: extract_citations(&envelope.grounding),
        action: envelope.function_call.as_ref().and_then(navigation_action),
    }
}
