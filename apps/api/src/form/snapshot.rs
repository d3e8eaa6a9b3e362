//! Persisted form record.
//!
//! Mirrors the JSON the browser form keeps in local storage: camelCase keys,
//! enums as plain strings, the troubleshooting selection as a string array.
//! Every field is optional and type-tolerant so that snapshots written by
//! older or foreign versions still load; conversion into `FormState` does the
//! normalisation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSnapshot {
    #[serde(deserialize_with = "lenient_string")]
    pub case_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub apf_creator: String,
    #[serde(deserialize_with = "lenient_string")]
    pub action_plan: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ce_called_in: String,
    #[serde(deserialize_with = "lenient_string")]
    pub min_conf: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub parts_not_picked_up: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub ce_name_phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub prev_wo_problem: String,
    #[serde(deserialize_with = "lenient_string")]
    pub prev_wo_action: String,
    #[serde(deserialize_with = "lenient_string")]
    pub new_symptom: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cause_new_symptom: String,
    #[serde(deserialize_with = "lenient_string")]
    pub next_action: String,
    #[serde(deserialize_with = "lenient_string")]
    pub part_order: String,
    #[serde(deserialize_with = "lenient_string")]
    pub min_conf_ts: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ts_search: String,
    #[serde(deserialize_with = "lenient_string_array")]
    pub selected_ts: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub additional_ts_details: String,
    #[serde(deserialize_with = "lenient_string")]
    pub model_description: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub sporadic_all_parts: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub sporadic_note: String,
    #[serde(deserialize_with = "lenient_bool", rename = "moreThan4Parts")]
    pub more_than_4_parts: bool,
    #[serde(deserialize_with = "lenient_string", rename = "whyMoreThan4")]
    pub why_more_than_4: String,
}

impl FormSnapshot {
    /// Parses a stored payload. Anything that is not a JSON object yields `None`.
    pub fn parse(payload: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(payload) {
            Ok(value @ Value::Object(_)) => match serde_json::from_value(value) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    tracing::warn!("Stored form snapshot rejected: {e}");
                    None
                }
            },
            Ok(_) => {
                tracing::warn!("Stored form snapshot is not a JSON object");
                None
            }
            Err(e) => {
                tracing::warn!("Stored form snapshot is not valid JSON: {e}");
                None
            }
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "ja" | "1"),
        Value::Number(n) => n.as_i64().is_some_and(|v| v != 0),
        _ => false,
    })
}

fn lenient_string_array<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
