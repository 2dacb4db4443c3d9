//! Environment-backed credential source.

use crate::ports::{ApiKey, CredentialSource};

/// Variable read when none is configured.
pub const DEFAULT_API_KEY_VAR: &str = "API_KEY";

/// Reads the API key from an environment variable on every lookup.
#[derive(Debug, Clone)]
pub struct EnvCredentialSource {
    var_name: String,
}

impl Default for EnvCredentialSource {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_VAR)
    }
}

impl EnvCredentialSource {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

impl CredentialSource for EnvCredentialSource {
    fn api_key(&self) -> Option<ApiKey> {
        std::env::var(&self.var_name)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(ApiKey::new)
    }
}

/// Always returns the same answer.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialSource {
    key: Option<ApiKey>,
}

impl StaticCredentialSource {
    /// A source with a configured key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(ApiKey::new(key)),
        }
    }

    /// A source with no key configured.
    pub fn missing() -> Self {
        Self { key: None }
    }
}

impl CredentialSource for StaticCredentialSource {
    fn api_key(&self) -> Option<ApiKey> {
        self.key
            .clone()
            .filter(|key| !key.expose().trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name so parallel tests do not interfere.

    #[test]
    fn env_source_reads_variable_on_each_call() {
        let source = EnvCredentialSource::new("ESG_SUNSHINE_TEST_KEY_RELOAD");
        std::env::remove_var("ESG_SUNSHINE_TEST_KEY_RELOAD");
        assert!(source.api_key().is_none());

        std::env::set_var("ESG_SUNSHINE_TEST_KEY_RELOAD", "abc");
        assert_eq!(source.api_key().unwrap().expose(), "abc");

        std::env::remove_var("ESG_SUNSHINE_TEST_KEY_RELOAD");
        assert!(source.api_key().is_none());
    }

    #[test]
    fn env_source_treats_blank_as_missing() {
        let source = EnvCredentialSource::new("ESG_SUNSHINE_TEST_KEY_BLANK");
        std::env::set_var("ESG_SUNSHINE_TEST_KEY_BLANK", "   ");
        assert!(source.api_key().is_none());
        std::env::remove_var("ESG_SUNSHINE_TEST_KEY_BLANK");
    }

    #[test]
    fn default_reads_api_key_variable() {
        assert_eq!(EnvCredentialSource::default().var_name(), "API_KEY");
    }

    #[test]
    fn static_source_answers() {
        assert_eq!(
            StaticCredentialSource::with_key("k").api_key().unwrap().expose(),
            "k"
        );
        assert!(StaticCredentialSource::missing().api_key().is_none());
        assert!(StaticCredentialSource::with_key("").api_key().is_none());
    }
}
