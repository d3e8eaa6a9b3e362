use crate::config::Config;
use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Open form sessions, one per browser storage profile.
    pub sessions: SessionRegistry,
}
