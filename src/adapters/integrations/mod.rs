//! Integration Adapters.
//!
//! Illustrative providers for the Flowlu and BlueCC connections. They
//! return fixed data; no network calls are made.

mod mock;

pub use mock::{BlueCcMockProvider, FlowluMockProvider};
