//! Internal failure taxonomy for content operations.
//!
//! These never leave [`ContentService`](super::ContentService): every
//! variant resolves to the operation's fallback value.

use thiserror::Error;

use crate::domain::content::{FallbackCause, InterpretError};
use crate::ports::AIError;

#[derive(Debug, Error)]
pub enum GenerationFailure {
    /// No API key configured for this call.
    #[error("no API key configured")]
    NoCredential,

    /// The model call itself failed.
    #[error("model invocation failed: {0}")]
    Invocation(#[from] AIError),

    /// The model answered, but not in the expected shape.
    #[error("malformed model response: {0}")]
    MalformedResponse(#[from] InterpretError),
}

impl GenerationFailure {
    /// Which fallback branch this failure selects.
    pub fn cause(&self) -> FallbackCause {
        match self {
            GenerationFailure::NoCredential => FallbackCause::MissingCredential,
            GenerationFailure::Invocation(_) | GenerationFailure::MalformedResponse(_) => {
                FallbackCause::Failed
            }
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationFailure::NoCredential => "no_credential",
            GenerationFailure::Invocation(_) => "invocation_failure",
            GenerationFailure::MalformedResponse(_) => "malformed_response",
        }
    }
}
