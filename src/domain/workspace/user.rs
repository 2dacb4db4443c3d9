//! The signed-in user's profile, wallet and memory.

use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::errors::WorkspaceError;
use crate::domain::content::{IntegrationKind, IntegrationState, MemoryFact, MemoryKind};
use crate::domain::foundation::{ItemId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Artifact,
    Tool,
    Skin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub acquired_date: Timestamp,
}

impl CollectionItem {
    pub fn new(name: impl Into<String>, kind: ItemKind, rarity: Rarity) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            kind,
            rarity,
            acquired_date: Timestamp::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub name: String,
    pub role: String,
    coins: u64,
    pub xp: u64,
    pub level: u32,
    pub max_xp: u64,
    pub badges: Vec<String>,
    pub inventory: Vec<CollectionItem>,
    pub memory: Vec<MemoryFact>,
    /// Credentials stay in memory only.
    #[serde(skip)]
    pub integrations: IntegrationState,
}

impl UserState {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            coins: 0,
            xp: 0,
            level: 1,
            max_xp: 1000,
            badges: Vec::new(),
            inventory: Vec::new(),
            memory: Vec::new(),
            integrations: IntegrationState::default(),
        }
    }

    pub fn with_coins(mut self, coins: u64) -> Self {
        self.coins = coins;
        self
    }

    pub fn with_progress(mut self, level: u32, xp: u64, max_xp: u64) -> Self {
        self.level = level;
        self.xp = xp;
        self.max_xp = max_xp;
        self
    }

    /// The demo profile the dashboard opens with.
    pub fn demo() -> Self {
        let mut user = Self::new("Jun Hong", "策略長")
            .with_coins(1250)
            .with_progress(5, 4500, 5000);
        user.badges = vec!["先驅者".to_string(), "分析師".to_string()];
        user.inventory = vec![CollectionItem::new("綠色藍圖", ItemKind::Artifact, Rarity::Rare)];
        user
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn credit(&mut self, amount: u64) -> u64 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }

    /// Deducts coins; the balance never goes negative.
    pub fn spend(&mut self, amount: u64) -> Result<u64, WorkspaceError> {
        if amount == 0 {
            return Err(WorkspaceError::NonPositiveAmount);
        }
        if amount > self.coins {
            return Err(WorkspaceError::InsufficientCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(self.coins)
    }

    /// Stores a fact for future chat context.
    pub fn remember(&mut self, content: impl Into<String>, kind: MemoryKind) -> &MemoryFact {
        self.memory.push(MemoryFact::new(content, kind));
        &self.memory[self.memory.len() - 1]
    }

    /// Connects or disconnects an integration. Disconnecting drops the key.
    pub fn set_integration(
        &mut self,
        kind: IntegrationKind,
        connected: bool,
        api_key: Option<String>,
        domain: Option<String>,
    ) {
        let status = self.integrations.get_mut(kind);
        status.connected = connected;
        if connected {
            status.api_key = api_key.map(Secret::new);
            status.domain = domain;
            status.last_sync = Some(Timestamp::now());
        } else {
            status.api_key = None;
            status.domain = None;
            status.last_sync = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn spend_rejects_overdraft() {
        let mut user = UserState::new("A", "B").with_coins(100);

        assert_eq!(
            user.spend(500),
            Err(WorkspaceError::InsufficientCoins {
                needed: 500,
                available: 100
            })
        );
        assert_eq!(user.spend(40), Ok(60));
        assert_eq!(user.spend(0), Err(WorkspaceError::NonPositiveAmount));
    }

    #[test]
    fn remember_appends_fact() {
        let mut user = UserState::demo();
        let fact = user.remember("偏好簡潔回答", MemoryKind::Preference).clone();
        assert_eq!(user.memory.last(), Some(&fact));
    }

    #[test]
    fn set_integration_tracks_connection() {
        let mut user = UserState::demo();
        user.set_integration(
            IntegrationKind::Flowlu,
            true,
            Some("fl-key".into()),
            Some("acme.flowlu.com".into()),
        );

        let status = user.integrations.get(IntegrationKind::Flowlu);
        assert!(status.connected);
        assert_eq!(status.api_key.as_ref().unwrap().expose_secret(), "fl-key");
        assert!(status.last_sync.is_some());
        assert_eq!(user.integrations.connected(), vec![IntegrationKind::Flowlu]);

        user.set_integration(IntegrationKind::Flowlu, false, None, None);
        assert!(user.integrations.get(IntegrationKind::Flowlu).api_key.is_none());
    }

    #[test]
    fn demo_profile_matches_dashboard_seed() {
        let user = UserState::demo();
        assert_eq!(user.coins(), 1250);
        assert_eq!(user.level, 5);
        assert_eq!(user.badges.len(), 2);
    }
}
