//! Credential Source Adapters.
//!
//! - `EnvCredentialSource` - reads the key from an environment variable
//! - `StaticCredentialSource` - a fixed answer, for tests and the CLI

mod env_source;

pub use env_source::{EnvCredentialSource, StaticCredentialSource, DEFAULT_API_KEY_VAR};
