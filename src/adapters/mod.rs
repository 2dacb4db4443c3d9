//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Gemini and mock model providers
//! - `credentials` - API key lookup
//! - `integrations` - Flowlu / BlueCC data sources

pub mod ai;
pub mod credentials;
pub mod integrations;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider, MockError};
pub use credentials::{EnvCredentialSource, StaticCredentialSource};
pub use integrations::{BlueCcMockProvider, FlowluMockProvider};
