use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::session::form_session::{FormSession, SessionSettings};
use crate::storage::SnapshotStore;

const MAX_PROFILE_LEN: usize = 64;

/// Profile ids name a storage scope and end up in file names.
pub fn validate_profile_id(profile: &str) -> Result<(), AppError> {
    if profile.is_empty() || profile.len() > MAX_PROFILE_LEN {
        return Err(AppError::Validation(format!(
            "profile id must be 1-{MAX_PROFILE_LEN} characters"
        )));
    }
    if !profile
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::Validation(
            "profile id may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }
    Ok(())
}

/// Open sessions by profile, loaded lazily from the store.
#[derive(Clone)]
pub struct SessionRegistry {
    store: Arc<dyn SnapshotStore>,
    settings: SessionSettings,
    sessions: Arc<Mutex<HashMap<String, Arc<Mutex<FormSession>>>>>,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn SnapshotStore>, settings: SessionSettings) -> Self {
        Self {
            store,
            settings,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get(&self, profile: &str) -> Result<Arc<Mutex<FormSession>>, AppError> {
        validate_profile_id(profile)?;

        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(profile) {
            return Ok(session.clone());
        }

        let session = FormSession::open(profile, self.store.clone(), self.settings).await;
        let session = Arc::new(Mutex::new(session));
        sessions.insert(profile.to_string(), session.clone());
        Ok(session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemorySnapshotStore;

    #[test]
    fn test_profile_id_rules() {
        assert!(validate_profile_id("desk-1_A").is_ok());
        assert!(validate_profile_id("").is_err());
        assert!(validate_profile_id("../etc").is_err());
        assert!(validate_profile_id("a b").is_err());
        assert!(validate_profile_id(&"x".repeat(65)).is_err());
    }

    #[tokio::test]
    async fn test_same_profile_shares_a_session() {
        let registry = SessionRegistry::new(
            Arc::new(InMemorySnapshotStore::new()),
            SessionSettings::default(),
        );
        let a = registry.get("desk-1").await.unwrap();
        let b = registry.get("desk-1").await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        registry.get("desk-2").await.unwrap();
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_invalid_profile_is_rejected() {
        let registry = SessionRegistry::new(
            Arc::new(InMemorySnapshotStore::new()),
            SessionSettings::default(),
        );
        assert!(matches!(
            registry.get("no/slashes").await,
            Err(AppError::Validation(_))
        ));
    }
}
