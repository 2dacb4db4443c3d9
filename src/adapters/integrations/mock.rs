//! Fixed-data integration providers.

use async_trait::async_trait;

use crate::domain::content::IntegrationKind;
use crate::ports::{CarbonSnapshot, IntegrationError, IntegrationProvider};

const FLOWLU_PROJECTS: &str =
    "[Flowlu 同步] 專案: 太陽能一期 (進行中), 員工 DEI 工作坊 (已完成), 供應鏈稽核 (規劃中)";

const BLUECC_SNAPSHOT: CarbonSnapshot = CarbonSnapshot {
    scope3: 4500,
    suppliers: 128,
};

fn require_key(kind: IntegrationKind, api_key: &str) -> Result<(), IntegrationError> {
    if api_key.trim().is_empty() {
        return Err(IntegrationError::NotConnected(kind));
    }
    Ok(())
}

/// Project tracker integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowluMockProvider;

#[async_trait]
impl IntegrationProvider for FlowluMockProvider {
    fn kind(&self) -> IntegrationKind {
        IntegrationKind::Flowlu
    }

    async fn fetch_projects(&self, api_key: &str) -> Result<String, IntegrationError> {
        require_key(self.kind(), api_key)?;
        tracing::debug!(integration = %self.kind(), "Syncing projects");
        Ok(FLOWLU_PROJECTS.to_string())
    }

    async fn fetch_carbon_data(&self, _api_key: &str) -> Result<CarbonSnapshot, IntegrationError> {
        Err(IntegrationError::Unsupported(self.kind(), "carbon data"))
    }
}

/// Supply-chain carbon integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlueCcMockProvider;

#[async_trait]
impl IntegrationProvider for BlueCcMockProvider {
    fn kind(&self) -> IntegrationKind {
        IntegrationKind::Bluecc
    }

    async fn fetch_projects(&self, _api_key: &str) -> Result<String, IntegrationError> {
        Err(IntegrationError::Unsupported(self.kind(), "projects"))
    }

    async fn fetch_carbon_data(&self, api_key: &str) -> Result<CarbonSnapshot, IntegrationError> {
        require_key(self.kind(), api_key)?;
        tracing::debug!(integration = %self.kind(), "Syncing carbon data");
        Ok(BLUECC_SNAPSHOT)
    }
}
