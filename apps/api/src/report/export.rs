//! Plain-text export of a generated report.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::report::OutputBundle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Apf,
    Premier,
    Escalation,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Apf, ReportKind::Premier, ReportKind::Escalation];

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Apf => "APF-OUTPUT",
            ReportKind::Premier => "PREMIER-SUPPORT",
            ReportKind::Escalation => ">4-PARTS-ESC",
        }
    }

    pub fn file_prefix(self) -> &'static str {
        match self {
            ReportKind::Apf => "APF_output",
            ReportKind::Premier => "Premier_template",
            ReportKind::Escalation => "Parts_ESC",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "apf" => Some(ReportKind::Apf),
            "premier" => Some(ReportKind::Premier),
            "escalation" => Some(ReportKind::Escalation),
            _ => None,
        }
    }

    /// Text of this report in a bundle, or `None` when there is nothing to
    /// export (never generated, or a hidden escalation section).
    pub fn content(self, bundle: &OutputBundle) -> Option<&str> {
        let text = match self {
            ReportKind::Apf => bundle.apf.as_str(),
            ReportKind::Premier => bundle.premier.as_str(),
            ReportKind::Escalation if bundle.show_escalation => bundle.escalation.as_str(),
            ReportKind::Escalation => "",
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `<prefix>_<caseId>.txt` for a numeric case id, otherwise
/// `<prefix>_<YYYYMMDD_HHMMSS>.txt`.
pub fn export_filename(kind: ReportKind, case_id: &str, now: NaiveDateTime) -> String {
    let case_id = case_id.trim();
    let suffix = if !case_id.is_empty() && case_id.chars().all(|c| c.is_ascii_digit()) {
        case_id.to_string()
    } else {
        now.format("%Y%m%d_%H%M%S").to_string()
    };
    sanitize_filename(&format!("{}_{}.txt", kind.file_prefix(), suffix))
}
