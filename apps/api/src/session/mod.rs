// Per-profile form sessions. Edits are synchronous; persistence and live
// regeneration run on trailing-edge debounce timers.

pub mod debounce;
pub mod form_session;
pub mod handlers;
pub mod registry;

pub use form_session::{SessionSettings, SessionView};
pub use registry::SessionRegistry;
