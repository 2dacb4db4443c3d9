//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, percentages, timestamps, errors)
//! - `content` - AI content operations: prompts, interpretation, fallbacks
//! - `workspace` - Caller-owned dashboard state

pub mod content;
pub mod foundation;
pub mod workspace;
