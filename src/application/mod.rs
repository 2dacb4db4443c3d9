//! Application layer - the content service façade.
//!
//! Coordinates the prompt builder, the model port, the interpreter and the
//! fallback policy. Callers get a plain value back from every operation.

mod content_service;
mod failure;

pub use content_service::ContentService;
pub use failure::GenerationFailure;
