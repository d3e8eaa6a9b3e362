//! One profile's form: lifecycle, debounced persistence and live regeneration.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::form::{FormPatch, FormState};
use crate::report::{generate, OutputBundle};
use crate::session::debounce::Debouncer;
use crate::storage::{load_form, save_form, SnapshotStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    /// Restored from a snapshot or defaults, nothing edited yet.
    Loaded,
    /// Edited; a snapshot write is pending.
    Dirty,
    /// The latest edit has been written.
    Persisted,
    /// Reverted to defaults and the stored snapshot cleared.
    Reset,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub persist_debounce: Duration,
    pub live_mode: bool,
    pub live_debounce: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            persist_debounce: Duration::from_millis(250),
            live_mode: false,
            live_debounce: Duration::from_millis(400),
        }
    }
}

/// State touched by background tasks as well as by request handlers.
#[derive(Debug)]
struct Shared {
    phase: LifecyclePhase,
    revision: u64,
    last_storage_error: Option<String>,
    outputs: Option<OutputBundle>,
}

/// What the form UI needs to render one profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub profile: String,
    pub form: FormState,
    pub ready: bool,
    pub parts_count: usize,
    pub ts_count: usize,
    pub phase: LifecyclePhase,
    pub live_mode: bool,
    /// A debounced snapshot write has not run yet.
    pub pending_write: bool,
    pub last_storage_error: Option<String>,
}

pub struct FormSession {
    profile: String,
    form: FormState,
    store: Arc<dyn SnapshotStore>,
    settings: SessionSettings,
    shared: Arc<Mutex<Shared>>,
    persist: Debouncer,
    live: Debouncer,
}

impl FormSession {
    pub async fn open(
        profile: impl Into<String>,
        store: Arc<dyn SnapshotStore>,
        settings: SessionSettings,
    ) -> Self {
        let profile = profile.into();
        let form = load_form(store.as_ref(), &profile).await;
        info!("Opened form session for profile {profile}");

        Self {
            profile,
            form,
            store,
            settings,
            shared: Arc::new(Mutex::new(Shared {
                phase: LifecyclePhase::Loaded,
                revision: 0,
                last_storage_error: None,
                outputs: None,
            })),
            persist: Debouncer::new(settings.persist_debounce),
            live: Debouncer::new(settings.live_debounce),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn has_pending_write(&self) -> bool {
        self.persist.is_pending()
    }

    pub async fn view(&self) -> SessionView {
        let shared = self.shared.lock().await;
        SessionView {
            profile: self.profile.clone(),
            form: self.form.clone(),
            ready: self.form.is_ready(),
            parts_count: self.form.parts_count(),
            ts_count: self.form.ts_count(),
            phase: shared.phase,
            live_mode: self.settings.live_mode,
            pending_write: self.has_pending_write(),
            last_storage_error: shared.last_storage_error.clone(),
        }
    }

    pub async fn update(&mut self, patch: FormPatch) {
        if patch.is_empty() {
            return;
        }
        self.form.apply(patch);
        self.mark_dirty().await;
    }

    /// Applies an arbitrary edit, then persists (debounced).
    pub async fn edit(&mut self, mutate: impl FnOnce(&mut FormState)) {
        let before = self.form.clone();
        mutate(&mut self.form);
        if self.form != before {
            self.mark_dirty().await;
        }
    }

    async fn mark_dirty(&mut self) {
        let revision = {
            let mut shared = self.shared.lock().await;
            shared.phase = LifecyclePhase::Dirty;
            shared.revision += 1;
            shared.revision
        };

        let store = self.store.clone();
        let shared = self.shared.clone();
        let profile = self.profile.clone();
        let form = self.form.clone();
        self.persist.schedule(async move {
            let result = save_form(store.as_ref(), &profile, &form).await;
            let mut shared = shared.lock().await;
            match result {
                Ok(()) => {
                    shared.last_storage_error = None;
                    if shared.revision == revision {
                        shared.phase = LifecyclePhase::Persisted;
                    }
                    debug!("Persisted revision {revision} for profile {profile}");
                }
                Err(e) => {
                    warn!("Failed to save form state for profile {profile}: {e:#}");
                    shared.last_storage_error = Some("Failed to save form state".to_string());
                }
            }
        });

        if self.settings.live_mode {
            let shared = self.shared.clone();
            let form = self.form.clone();
            self.live.schedule(async move {
                let bundle = generate(&form, Local::now().naive_local());
                shared.lock().await.outputs = Some(bundle);
            });
        }
    }

    /// Rebuilds all three reports from the current form.
    pub async fn generate(&mut self) -> OutputBundle {
        self.live.cancel();
        let bundle = generate(&self.form, Local::now().naive_local());
        self.shared.lock().await.outputs = Some(bundle.clone());
        debug!(
            "Generated reports for profile {} (escalation shown: {})",
            self.profile, bundle.show_escalation
        );
        bundle
    }

    pub async fn outputs(&self) -> Option<OutputBundle> {
        self.shared.lock().await.outputs.clone()
    }

    /// Back to defaults; drops pending work, outputs and the stored snapshot.
    pub async fn reset(&mut self) {
        // An in-flight write must land before the clear, not after it.
        self.persist.settle().await;
        self.live.cancel();
        self.form = FormState::default();

        let cleared = self.store.clear(&self.profile).await;
        let mut shared = self.shared.lock().await;
        shared.phase = LifecyclePhase::Reset;
        shared.revision += 1;
        shared.outputs = None;
        match cleared {
            Ok(()) => {
                shared.last_storage_error = None;
                info!("Reset form for profile {}", self.profile);
            }
            Err(e) => {
                warn!("Failed to clear form state for profile {}: {e:#}", self.profile);
                shared.last_storage_error = Some("Failed to reset form".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{CeCalledIn, FormSnapshot};
    use crate::storage::InMemorySnapshotStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingStore {
        inner: InMemorySnapshotStore,
        saves: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SnapshotStore for CountingStore {
        async fn load(&self, profile: &str) -> Result<Option<String>> {
            self.inner.load(profile).await
        }
        async fn save(&self, profile: &str, payload: &str) -> Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("quota exceeded");
            }
            self.inner.save(profile, payload).await
        }
        async fn clear(&self, profile: &str) -> Result<()> {
            self.inner.clear(profile).await
        }
    }

    /// Finishes every accepted write even if the calling task is aborted,
    /// the way blocking file I/O does.
    #[derive(Default)]
    struct DetachedWriteStore {
        inner: Arc<InMemorySnapshotStore>,
    }

    #[async_trait]
    impl SnapshotStore for DetachedWriteStore {
        async fn load(&self, profile: &str) -> Result<Option<String>> {
            self.inner.load(profile).await
        }
        async fn save(&self, profile: &str, payload: &str) -> Result<()> {
            let inner = self.inner.clone();
            let profile = profile.to_string();
            let payload = payload.to_string();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                inner.save(&profile, &payload).await
            })
            .await?
        }
        async fn clear(&self, profile: &str) -> Result<()> {
            self.inner.clear(profile).await
        }
    }

    fn settings(live_mode: bool) -> SessionSettings {
        SessionSettings {
            persist_debounce: Duration::from_millis(250),
            live_mode,
            live_debounce: Duration::from_millis(400),
        }
    }

    fn patch(json: &str) -> FormPatch {
        serde_json::from_str(json).unwrap()
    }

    async fn stored(store: &CountingStore, profile: &str) -> FormSnapshot {
        let payload = store.inner.load(profile).await.unwrap().unwrap();
        FormSnapshot::parse(&payload).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_are_persisted_once_after_settling() {
        let store = Arc::new(CountingStore::default());
        let mut session = FormSession::open("desk-1", store.clone(), settings(false)).await;
        assert_eq!(session.view().await.phase, LifecyclePhase::Loaded);

        session.update(patch(r#"{"caseId": "1"}"#)).await;
        session.update(patch(r#"{"caseId": "12"}"#)).await;
        session.update(patch(r#"{"caseId": "123", "ceCalledIn": "ja"}"#)).await;
        assert_eq!(session.view().await.phase, LifecyclePhase::Dirty);
        assert!(session.has_pending_write());

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        assert_eq!(session.view().await.phase, LifecyclePhase::Persisted);
        let snap = stored(&store, "desk-1").await;
        assert_eq!(snap.case_id, "123");
        assert_eq!(snap.ce_called_in, "YES");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopen_restores_persisted_state() {
        let store = Arc::new(CountingStore::default());
        {
            let mut session = FormSession::open("desk-1", store.clone(), settings(false)).await;
            session
                .edit(|form| form.part_order = "LCD -".to_string())
                .await;
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        let session = FormSession::open("desk-1", store.clone(), settings(false)).await;
        assert_eq!(session.form().part_order, "LCD -");
    }

    #[tokio::test(start_paused = true)]
    async fn test_noop_edit_does_not_schedule_a_write() {
        let store = Arc::new(CountingStore::default());
        let mut session = FormSession::open("desk-1", store.clone(), settings(false)).await;
        session.edit(|_| {}).await;
        session.update(FormPatch::default()).await;
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
        assert_eq!(session.view().await.phase, LifecyclePhase::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_storage_failure_is_reported_not_raised() {
        let store = Arc::new(CountingStore {
            fail: true,
            ..Default::default()
        });
        let mut session = FormSession::open("desk-1", store.clone(), settings(false)).await;
        session.update(patch(r#"{"apfCreator": "A"}"#)).await;
        tokio::time::sleep(Duration::from_millis(300)).await;

        let view = session.view().await;
        assert_eq!(view.phase, LifecyclePhase::Dirty);
        assert_eq!(
            view.last_storage_error.as_deref(),
            Some("Failed to save form state")
        );
        assert_eq!(view.form.apf_creator, "A");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_everything() {
        let store = Arc::new(CountingStore::default());
        let mut session = FormSession::open("desk-1", store.clone(), settings(false)).await;
        session
            .update(patch(r#"{"caseId": "99", "ceCalledIn": "NOT_REQUIRED"}"#))
            .await;
        tokio::time::sleep(Duration::from_millis(300)).await;
        session.generate().await;

        session
            .update(patch(r#"{"caseId": "100"}"#))
            .await;
        session.reset().await;
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(session.form(), &FormState::default());
        assert_eq!(session.view().await.phase, LifecyclePhase::Reset);
        assert!(session.outputs().await.is_none());
        assert_eq!(store.inner.load("desk-1").await.unwrap(), None);
        assert_eq!(session.form().ce_called_in, CeCalledIn::No);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_slow_write_leaves_no_snapshot() {
        let store = Arc::new(DetachedWriteStore::default());
        let mut session = FormSession::open("desk-1", store.clone(), settings(false)).await;
        session.update(patch(r#"{"caseId": "77"}"#)).await;

        // Debounce elapsed; the write is now in progress.
        tokio::time::sleep(Duration::from_millis(260)).await;
        session.reset().await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(store.inner.load("desk-1").await.unwrap(), None);
        let reopened = FormSession::open("desk-1", store.clone(), settings(false)).await;
        assert_eq!(reopened.form(), &FormState::default());
        assert_eq!(reopened.view().await.phase, LifecyclePhase::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_generate_stores_bundle() {
        let store = Arc::new(CountingStore::default());
        let mut session = FormSession::open("desk-1", store, settings(false)).await;
        assert!(session.outputs().await.is_none());
        let bundle = session.generate().await;
        assert!(bundle.apf.starts_with("Case ID :"));
        assert_eq!(session.outputs().await, Some(bundle));
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_mode_regenerates_after_debounce() {
        let store = Arc::new(CountingStore::default());
        let mut session = FormSession::open("desk-1", store, settings(true)).await;
        session
            .update(patch(r#"{"modelDescription": "T14"}"#))
            .await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(session.outputs().await.is_none());

        tokio::time::sleep(Duration::from_millis(400)).await;
        let bundle = session.outputs().await.unwrap();
        assert!(bundle.premier.contains("Model description: T14"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_mode_off_leaves_outputs_alone() {
        let store = Arc::new(CountingStore::default());
        let mut session = FormSession::open("desk-1", store, settings(false)).await;
        session
            .update(patch(r#"{"modelDescription": "T14"}"#))
            .await;
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(session.outputs().await.is_none());
    }
}
