//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - the generative model (model invoker)
//! - `CredentialSource` - API key lookup, once per call
//! - `IntegrationProvider` - data from connected Flowlu / BlueCC backends

mod ai_provider;
mod credential_source;
mod integration_provider;

pub use ai_provider::{
    AIError, AIProvider, ApiKey, FinishReason, GenerationRequest, GenerationResponse,
    ProviderInfo, TokenUsage,
};
pub use credential_source::CredentialSource;
pub use integration_provider::{CarbonSnapshot, IntegrationError, IntegrationProvider};
