//! Model provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::adapters::credentials::DEFAULT_API_KEY_VAR;

/// Model provider configuration
///
/// The API key itself is not stored here. `api_key_var` names the
/// environment variable that is read on every call.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Generative Language API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_var")]
    pub api_key_var: String,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Provider configuration for the Gemini adapter
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig::new()
            .with_model(&self.model)
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout())
    }

    /// Validate model configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.api_key_var.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__API_KEY_VAR"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            api_key_var: default_api_key_var(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_api_key_var() -> String {
    DEFAULT_API_KEY_VAR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.api_key_var, "API_KEY");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 15,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.gemini().timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_base_url_must_be_http() {
        let config = AiConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));
    }

    #[test]
    fn test_blank_model_rejected() {
        let config = AiConfig {
            model: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI__MODEL"))
        );
    }
}
