use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::storage::SnapshotStore;

/// One `<profile>.json` file per profile under a data directory.
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the data directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", store.dir.display()))?;
        info!("Snapshot store at {}", store.dir.display());
        Ok(store)
    }

    fn path_for(&self, profile: &str) -> PathBuf {
        self.dir.join(format!("{profile}.json"))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self, profile: &str) -> Result<Option<String>> {
        let path = self.path_for(profile);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    async fn save(&self, profile: &str, payload: &str) -> Result<()> {
        let path = self.path_for(profile);
        let tmp = self.dir.join(format!("{profile}.json.tmp"));
        fs::write(&tmp, payload)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Saved snapshot for profile {profile}");
        Ok(())
    }

    async fn clear(&self, profile: &str) -> Result<()> {
        let path = self.path_for(profile);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
