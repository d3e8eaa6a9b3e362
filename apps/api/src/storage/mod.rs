//! Snapshot persistence behind an injectable key/value interface.
//!
//! The store deals in raw JSON payloads keyed by profile; decoding and the
//! fallback to defaults happen in `load_form`, so a corrupt payload never
//! reaches callers as an error.

pub mod file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::form::{FormSnapshot, FormState};

pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load(&self, profile: &str) -> Result<Option<String>>;
    async fn save(&self, profile: &str, payload: &str) -> Result<()>;
    async fn clear(&self, profile: &str) -> Result<()>;
}

/// Restores the form for a profile, or defaults when there is no usable
/// snapshot.
pub async fn load_form(store: &dyn SnapshotStore, profile: &str) -> FormState {
    let payload = match store.load(profile).await {
        Ok(Some(payload)) => payload,
        Ok(None) => return FormState::default(),
        Err(e) => {
            tracing::warn!("Failed to read snapshot for profile {profile}: {e:#}");
            return FormState::default();
        }
    };

    match FormSnapshot::parse(&payload) {
        Some(snapshot) => FormState::from_snapshot(snapshot),
        None => {
            tracing::warn!("Discarding unreadable snapshot for profile {profile}");
            FormState::default()
        }
    }
}

/// Writes the normalized snapshot of `form`.
pub async fn save_form(store: &dyn SnapshotStore, profile: &str, form: &FormState) -> Result<()> {
    let payload = serde_json::to_string(&form.to_snapshot())?;
    store.save(profile, &payload).await
}
