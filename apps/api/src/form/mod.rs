// Form state: enumerated fields, the persisted snapshot record, and the typed
// state the reports are built from.

pub mod fields;
pub mod snapshot;
pub mod state;

pub use fields::{ActionPlan, CeCalledIn, YesNo};
pub use snapshot::FormSnapshot;
pub use state::{FormPatch, FormState};
