//! ESG Sunshine - AI-assisted content service for a sustainability dashboard.
//!
//! The crate turns typed dashboard requests (health diagnosis, missions,
//! chat, report drafting, trend research) into prompts for a hosted
//! generative model and interprets the answers. Any failure degrades to a
//! well-typed fallback value, so callers always get something to render.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
