use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::storage::SnapshotStore;

/// Process-local store, used in tests and when no data directory is wanted.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: RwLock<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self, profile: &str) -> Result<Option<String>> {
        Ok(self.snapshots.read().await.get(profile).cloned())
    }

    async fn save(&self, profile: &str, payload: &str) -> Result<()> {
        self.snapshots
            .write()
            .await
            .insert(profile.to_string(), payload.to_string());
        Ok(())
    }

    async fn clear(&self, profile: &str) -> Result<()> {
        self.snapshots.write().await.remove(profile);
        Ok(())
    }
}
