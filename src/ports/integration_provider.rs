//! Integration Provider Port - data pulled from connected backends.
//!
//! The dashboard can be linked to a project tracker (Flowlu) and a
//! supply-chain carbon platform (BlueCC). Only the shape of the data is
//! fixed here; the shipped adapters are illustrative mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::content::IntegrationKind;

/// Scope 3 emissions snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarbonSnapshot {
    /// Scope 3 emissions, tCO2e.
    pub scope3: u64,
    /// Suppliers covered.
    pub suppliers: u32,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrationError {
    #[error("{0} is not connected")]
    NotConnected(IntegrationKind),

    #[error("{0} does not provide {1}")]
    Unsupported(IntegrationKind, &'static str),
}

/// Port for reading data from an external integration.
#[async_trait]
pub trait IntegrationProvider: Send + Sync {
    /// Which integration this provider speaks to.
    fn kind(&self) -> IntegrationKind;

    /// One-line summary of synced projects.
    async fn fetch_projects(&self, api_key: &str) -> Result<String, IntegrationError>;

    /// Latest carbon data.
    async fn fetch_carbon_data(&self, api_key: &str) -> Result<CarbonSnapshot, IntegrationError>;
}
