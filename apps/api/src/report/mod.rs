//! Report generation: the APF report, the Premier Support template and the
//! ">4 parts" escalation, rebuilt together from the current form.

pub mod builders;
pub mod export;
pub mod handlers;
pub mod sanitize;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::form::FormState;

pub use builders::{build_apf_output, build_escalation_output, build_premier_output};
pub use export::{export_filename, ReportKind};

/// One generation pass. Always replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputBundle {
    pub apf: String,
    pub premier: String,
    pub escalation: String,
    pub show_escalation: bool,
}

pub fn generate(form: &FormState, generated_at: NaiveDateTime) -> OutputBundle {
    let escalation = build_escalation_output(form);
    OutputBundle {
        apf: build_apf_output(form, generated_at),
        premier: build_premier_output(form),
        show_escalation: !escalation.is_empty(),
        escalation,
    }
}
