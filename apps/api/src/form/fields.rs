//! Enumerated form fields and their lenient parsers.
//!
//! Every enum deserializes from any string: values from older snapshots or
//! other-language variants are coerced, and anything unrecognised becomes the
//! field default.

use serde::{Deserialize, Serialize};

fn canonical(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn is_affirmative(v: &str) -> bool {
    matches!(v, "YES" | "JA" | "TRUE")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ActionPlan {
    #[default]
    Failed,
    Passed,
    NotApplicable,
}

impl ActionPlan {
    pub const ALL: [ActionPlan; 3] = [ActionPlan::Failed, ActionPlan::Passed, ActionPlan::NotApplicable];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionPlan::Failed => "FAILED",
            ActionPlan::Passed => "PASSED",
            ActionPlan::NotApplicable => "N/A",
        }
    }

    pub fn normalize(raw: &str) -> Self {
        match canonical(raw).as_str() {
            "PASSED" | "PASS" => ActionPlan::Passed,
            "N/A" | "NA" | "N_A" => ActionPlan::NotApplicable,
            _ => ActionPlan::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum CeCalledIn {
    Yes,
    #[default]
    No,
    NotRequired,
}

impl CeCalledIn {
    pub const ALL: [CeCalledIn; 3] = [CeCalledIn::Yes, CeCalledIn::No, CeCalledIn::NotRequired];

    pub fn as_str(self) -> &'static str {
        match self {
            CeCalledIn::Yes => "YES",
            CeCalledIn::No => "NO",
            CeCalledIn::NotRequired => "NOT_REQUIRED",
        }
    }

    pub fn normalize(raw: &str) -> Self {
        let v = canonical(raw);
        if is_affirmative(&v) {
            return CeCalledIn::Yes;
        }
        match v.as_str() {
            "NOTREQUIRED" | "NOT-REQUIRED" | "NOT_REQUIRED" | "NOT REQUIRED" => {
                CeCalledIn::NotRequired
            }
            _ => CeCalledIn::No,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::Yes, YesNo::No];

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "YES",
            YesNo::No => "NO",
        }
    }

    pub fn normalize(raw: &str) -> Self {
        if is_affirmative(&canonical(raw)) {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

macro_rules! lenient_string_enum {
    ($($ty:ty),*) => {
        $(
            impl From<String> for $ty {
                fn from(raw: String) -> Self {
                    <$ty>::normalize(&raw)
                }
            }

            impl From<$ty> for &'static str {
                fn from(value: $ty) -> Self {
                    value.as_str()
                }
            }
        )*
    };
}

lenient_string_enum!(ActionPlan, CeCalledIn, YesNo);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ce_called_in_variants() {
        assert_eq!(CeCalledIn::normalize("yes"), CeCalledIn::Yes);
        assert_eq!(CeCalledIn::normalize("Ja"), CeCalledIn::Yes);
        assert_eq!(CeCalledIn::normalize("true"), CeCalledIn::Yes);
        assert_eq!(CeCalledIn::normalize("NotRequired"), CeCalledIn::NotRequired);
        assert_eq!(CeCalledIn::normalize("not-required"), CeCalledIn::NotRequired);
        assert_eq!(CeCalledIn::normalize("NOT_REQUIRED"), CeCalledIn::NotRequired);
        assert_eq!(CeCalledIn::normalize("No"), CeCalledIn::No);
        assert_eq!(CeCalledIn::normalize(""), CeCalledIn::No);
        assert_eq!(CeCalledIn::normalize("maybe"), CeCalledIn::No);
    }

    #[test]
    fn test_yes_no_variants() {
        assert_eq!(YesNo::normalize("JA"), YesNo::Yes);
        assert_eq!(YesNo::normalize(" Yes "), YesNo::Yes);
        assert_eq!(YesNo::normalize("nein"), YesNo::No);
        assert_eq!(YesNo::normalize(""), YesNo::No);
    }

    #[test]
    fn test_action_plan_variants() {
        assert_eq!(ActionPlan::normalize("passed"), ActionPlan::Passed);
        assert_eq!(ActionPlan::normalize("N/A"), ActionPlan::NotApplicable);
        assert_eq!(ActionPlan::normalize("garbage"), ActionPlan::Failed);
        assert_eq!(ActionPlan::default(), ActionPlan::Failed);
    }

    #[test]
    fn test_serde_is_canonical_and_lenient() {
        assert_eq!(
            serde_json::to_string(&CeCalledIn::NotRequired).unwrap(),
            r#""NOT_REQUIRED""#
        );
        let parsed: CeCalledIn = serde_json::from_str(r#""ja""#).unwrap();
        assert_eq!(parsed, CeCalledIn::Yes);
        let parsed: ActionPlan = serde_json::from_str(r#""n/a""#).unwrap();
        assert_eq!(parsed, ActionPlan::NotApplicable);
    }
}
