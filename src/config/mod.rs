//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ESG_SUNSHINE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use esg_sunshine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {}", config.ai.model);
//! ```

mod ai;
mod error;
mod logging;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads successfully.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Model provider configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ESG_SUNSHINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ESG_SUNSHINE__AI__MODEL=gemini-2.5-pro` -> `ai.model = gemini-2.5-pro`
    /// - `ESG_SUNSHINE__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ESG_SUNSHINE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
