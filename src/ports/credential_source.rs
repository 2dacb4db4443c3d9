//! Credential Source Port - where the model API key comes from.
//!
//! Looked up once per operation. Implementations must not cache the answer
//! across calls: a key added or removed while the process runs is picked up
//! by the next operation.

use super::ai_provider::ApiKey;

/// Port yielding the current API key, if one is configured.
pub trait CredentialSource: Send + Sync {
    /// Returns the key, or `None` when none is configured (or it is blank).
    fn api_key(&self) -> Option<ApiKey>;
}
