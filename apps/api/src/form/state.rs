use serde::{Deserialize, Serialize};

use crate::form::fields::{ActionPlan, CeCalledIn, YesNo};
use crate::form::snapshot::FormSnapshot;
use crate::part_order::count_part_lines;
use crate::selection::SelectedTs;

/// Current values of every form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub case_id: String,
    pub apf_creator: String,
    pub action_plan: ActionPlan,
    pub ce_called_in: CeCalledIn,
    pub min_conf: YesNo,
    pub parts_not_picked_up: bool,
    pub ce_name_phone: String,
    pub prev_wo_problem: String,
    pub prev_wo_action: String,
    pub new_symptom: String,
    pub cause_new_symptom: String,
    pub next_action: String,
    /// Raw part-order box; the chip view is derived from it.
    pub part_order: String,
    /// Min-confidence reported in the CE troubleshooting section. Overrides
    /// `min_conf` in the APF report unless it is NO.
    pub min_conf_ts: YesNo,
    pub ts_search: String,
    pub selected_ts: SelectedTs,
    pub additional_ts_details: String,
    pub model_description: String,
    pub sporadic_all_parts: bool,
    pub sporadic_note: String,
    #[serde(rename = "moreThan4Parts")]
    pub more_than_4_parts: bool,
    #[serde(rename = "whyMoreThan4")]
    pub why_more_than_4: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    pub case_id: Option<String>,
    pub apf_creator: Option<String>,
    pub action_plan: Option<ActionPlan>,
    pub ce_called_in: Option<CeCalledIn>,
    pub min_conf: Option<YesNo>,
    pub parts_not_picked_up: Option<bool>,
    pub ce_name_phone: Option<String>,
    pub prev_wo_problem: Option<String>,
    pub prev_wo_action: Option<String>,
    pub new_symptom: Option<String>,
    pub cause_new_symptom: Option<String>,
    pub next_action: Option<String>,
    pub part_order: Option<String>,
    pub min_conf_ts: Option<YesNo>,
    pub ts_search: Option<String>,
    pub selected_ts: Option<Vec<String>>,
    pub additional_ts_details: Option<String>,
    pub model_description: Option<String>,
    pub sporadic_all_parts: Option<bool>,
    pub sporadic_note: Option<String>,
    #[serde(rename = "moreThan4Parts")]
    pub more_than_4_parts: Option<bool>,
    #[serde(rename = "whyMoreThan4")]
    pub why_more_than_4: Option<String>,
}

impl FormPatch {
    pub fn is_empty(&self) -> bool {
        self.case_id.is_none()
            && self.apf_creator.is_none()
            && self.action_plan.is_none()
            && self.ce_called_in.is_none()
            && self.min_conf.is_none()
            && self.parts_not_picked_up.is_none()
            && self.ce_name_phone.is_none()
            && self.prev_wo_problem.is_none()
            && self.prev_wo_action.is_none()
            && self.new_symptom.is_none()
            && self.cause_new_symptom.is_none()
            && self.next_action.is_none()
            && self.part_order.is_none()
            && self.min_conf_ts.is_none()
            && self.ts_search.is_none()
            && self.selected_ts.is_none()
            && self.additional_ts_details.is_none()
            && self.model_description.is_none()
            && self.sporadic_all_parts.is_none()
            && self.sporadic_note.is_none()
            && self.more_than_4_parts.is_none()
            && self.why_more_than_4.is_none()
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl FormState {
    pub fn apply(&mut self, patch: FormPatch) {
        set(&mut self.case_id, patch.case_id);
        set(&mut self.apf_creator, patch.apf_creator);
        set(&mut self.action_plan, patch.action_plan);
        set(&mut self.ce_called_in, patch.ce_called_in);
        set(&mut self.min_conf, patch.min_conf);
        set(&mut self.parts_not_picked_up, patch.parts_not_picked_up);
        set(&mut self.ce_name_phone, patch.ce_name_phone);
        set(&mut self.prev_wo_problem, patch.prev_wo_problem);
        set(&mut self.prev_wo_action, patch.prev_wo_action);
        set(&mut self.new_symptom, patch.new_symptom);
        set(&mut self.cause_new_symptom, patch.cause_new_symptom);
        set(&mut self.next_action, patch.next_action);
        set(&mut self.part_order, patch.part_order);
        set(&mut self.min_conf_ts, patch.min_conf_ts);
        set(&mut self.ts_search, patch.ts_search);
        set(
            &mut self.selected_ts,
            patch.selected_ts.map(|labels| SelectedTs::from_labels(&labels)),
        );
        set(&mut self.additional_ts_details, patch.additional_ts_details);
        set(&mut self.model_description, patch.model_description);
        set(&mut self.sporadic_all_parts, patch.sporadic_all_parts);
        set(&mut self.sporadic_note, patch.sporadic_note);
        set(&mut self.more_than_4_parts, patch.more_than_4_parts);
        set(&mut self.why_more_than_4, patch.why_more_than_4);
    }

    /// Advisory only: generation runs whether or not the form is ready.
    pub fn is_ready(&self) -> bool {
        let case_id = self.case_id.trim();
        !case_id.is_empty()
            && case_id.chars().all(|c| c.is_ascii_digit())
            && !self.apf_creator.trim().is_empty()
    }

    pub fn parts_count(&self) -> usize {
        count_part_lines(&self.part_order)
    }

    pub fn ts_count(&self) -> usize {
        self.selected_ts.len()
    }

    /// Restores a stored record, coercing enumerated fields to canonical values.
    pub fn from_snapshot(snapshot: FormSnapshot) -> Self {
        Self {
            case_id: snapshot.case_id,
            apf_creator: snapshot.apf_creator,
            action_plan: ActionPlan::normalize(&snapshot.action_plan),
            ce_called_in: CeCalledIn::normalize(&snapshot.ce_called_in),
            min_conf: YesNo::normalize(&snapshot.min_conf),
            parts_not_picked_up: snapshot.parts_not_picked_up,
            ce_name_phone: snapshot.ce_name_phone,
            prev_wo_problem: snapshot.prev_wo_problem,
            prev_wo_action: snapshot.prev_wo_action,
            new_symptom: snapshot.new_symptom,
            cause_new_symptom: snapshot.cause_new_symptom,
            next_action: snapshot.next_action,
            part_order: snapshot.part_order,
            min_conf_ts: YesNo::normalize(&snapshot.min_conf_ts),
            ts_search: snapshot.ts_search,
            selected_ts: SelectedTs::from_labels(&snapshot.selected_ts),
            additional_ts_details: snapshot.additional_ts_details,
            model_description: snapshot.model_description,
            sporadic_all_parts: snapshot.sporadic_all_parts,
            sporadic_note: snapshot.sporadic_note,
            more_than_4_parts: snapshot.more_than_4_parts,
            why_more_than_4: snapshot.why_more_than_4,
        }
    }

    pub fn to_snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            case_id: self.case_id.clone(),
            apf_creator: self.apf_creator.clone(),
            action_plan: self.action_plan.as_str().to_string(),
            ce_called_in: self.ce_called_in.as_str().to_string(),
            min_conf: self.min_conf.as_str().to_string(),
            parts_not_picked_up: self.parts_not_picked_up,
            ce_name_phone: self.ce_name_phone.clone(),
            prev_wo_problem: self.prev_wo_problem.clone(),
            prev_wo_action: self.prev_wo_action.clone(),
            new_symptom: self.new_symptom.clone(),
            cause_new_symptom: self.cause_new_symptom.clone(),
            next_action: self.next_action.clone(),
            part_order: self.part_order.clone(),
            min_conf_ts: self.min_conf_ts.as_str().to_string(),
            ts_search: self.ts_search.clone(),
            selected_ts: self.selected_ts.labels().into_iter().map(String::from).collect(),
            additional_ts_details: self.additional_ts_details.clone(),
            model_description: self.model_description.clone(),
            sporadic_all_parts: self.sporadic_all_parts,
            sporadic_note: self.sporadic_note.clone(),
            more_than_4_parts: self.more_than_4_parts,
            why_more_than_4: self.why_more_than_4.clone(),
        }
    }
}
