//! The three report templates.
//!
//! All builders are total over `FormState`: empty fields render as empty
//! slots. `[X]` marks a selected box and `[ ]` an unselected one in every
//! report.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::form::{ActionPlan, CeCalledIn, FormState, YesNo};
use crate::report::sanitize::{sanitize_input, sanitize_multiline};

/// Escalation is only written for strictly more part lines than this.
pub const ESCALATION_PART_THRESHOLD: usize = 4;

const PARTS_NOT_PICKED_UP: &str =
    "CE did not pick up parts within 5 days -parts returned (set repeat repair reason to OTHER/UNKNOWN)";

static QUANTITY_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\s+x\s+\d+\s*$").ok());

const RULE: &str = "=========================================";

pub fn mark(selected: bool) -> &'static str {
    if selected {
        "[X]"
    } else {
        "[ ]"
    }
}

/// Resolved troubleshooting text for the APF report: catalog descriptions in
/// selection order, then the free-text details when present.
fn ts_descriptions(form: &FormState) -> String {
    let mut items: Vec<String> = form
        .selected_ts
        .descriptions()
        .into_iter()
        .map(String::from)
        .collect();
    let extra = sanitize_input(&form.additional_ts_details);
    if !extra.is_empty() {
        items.push(extra);
    }
    items.join(", ")
}

/// The TS-section min-confidence wins unless it is NO.
fn effective_min_conf(form: &FormState) -> YesNo {
    if form.min_conf_ts != YesNo::No {
        form.min_conf_ts
    } else {
        form.min_conf
    }
}

/// Primary "APF" report.
pub fn build_apf_output(form: &FormState, generated_at: NaiveDateTime) -> String {
    let date = generated_at.format("%d.%m.%Y");
    let time = generated_at.format("%H:%M");

    let ce_yes = mark(form.ce_called_in == CeCalledIn::Yes);
    let ce_no = mark(form.ce_called_in == CeCalledIn::No);
    let ce_not_required = mark(form.ce_called_in == CeCalledIn::NotRequired);

    let min_conf = effective_min_conf(form);
    let min_conf_yes = mark(min_conf == YesNo::Yes);
    let min_conf_no = mark(min_conf == YesNo::No);

    format!(
        "Case ID :{case_id}
APFCreator: {creator}

**** ACTION PLAN {action_plan} ****
CE-Called-In-Yes:{ce_yes}
CE-Called-In-No:{ce_no}
CE-Called-In-NotRequired:{ce_not_required}

CE Name/Phone: {ce_name_phone}

Previous WO Problem: {prev_problem}
Previous WO Action: {prev_action}

New Symptom: {symptom}

APF TS performed: {ts}

Min-conf-yes:{min_conf_yes}
Min-conf-no:{min_conf_no}

Cause for new symptom: {cause}

{parts_mark} {PARTS_NOT_PICKED_UP}

Next action: {next_action}
Part order:
{part_order}

Generated on: {date} at {time}
--- Ende ---",
        case_id = sanitize_input(&form.case_id),
        creator = sanitize_input(&form.apf_creator),
        action_plan = form.action_plan.as_str(),
        ce_name_phone = sanitize_input(&form.ce_name_phone),
        prev_problem = sanitize_input(&form.prev_wo_problem),
        prev_action = sanitize_input(&form.prev_wo_action),
        symptom = sanitize_multiline(&form.new_symptom),
        ts = ts_descriptions(form),
        cause = sanitize_multiline(&form.cause_new_symptom),
        parts_mark = mark(form.parts_not_picked_up),
        next_action = sanitize_input(&form.next_action),
        part_order = sanitize_multiline(&form.part_order),
    )
}

/// "Premier Support" template. Lists raw troubleshooting labels, not the
/// resolved descriptions.
pub fn build_premier_output(form: &FormState) -> String {
    let repeat_repair = form.action_plan == ActionPlan::Failed;

    let mut items: Vec<String> = form
        .selected_ts
        .labels()
        .into_iter()
        .map(String::from)
        .collect();
    let extra = sanitize_input(&form.additional_ts_details);
    if !extra.is_empty() {
        items.push(extra);
    }
    let troubleshooting = items.join(", ");

    format!(
        "{RULE}
*Premier - Support*
{RULE}
Model description: {model}
Repeat Repair: Yes{repeat_yes}  No{repeat_no}
Sporadic problem, replace ALL ordered parts under all circumstances {sporadic}
NOTE for sporadic problem: {sporadic_note}
{RULE}
DETAILED PROBLEM DESCRIPTION: {symptom}
{RULE}
ALREADY PERFORMED TROUBLESHOOTING: {troubleshooting}
{RULE}
PART NAME:
{part_order}
{RULE}
WO INITIATOR: {initiator}",
        model = sanitize_input(&form.model_description),
        repeat_yes = mark(repeat_repair),
        repeat_no = mark(!repeat_repair),
        sporadic = mark(form.sporadic_all_parts),
        sporadic_note = sanitize_multiline(&form.sporadic_note),
        symptom = sanitize_multiline(&form.new_symptom),
        part_order = sanitize_multiline(&form.part_order),
        initiator = sanitize_input(&form.apf_creator),
    )
}

/// Bare part name of a part-order line: text before the first " - " (or a
/// trailing " -") with a trailing " x <n>" removed.
pub fn bare_part_name(line: &str) -> String {
    let head = match line.find(" - ") {
        Some(idx) if idx > 0 => &line[..idx],
        _ => line.trim_end().strip_suffix(" -").unwrap_or(line),
    };
    match QUANTITY_SUFFIX.as_ref() {
        Some(re) => sanitize_input(&re.replace(head, "")),
        None => sanitize_input(head),
    }
}

/// ">4 parts" escalation justification. Empty unless the flag is set and the
/// part order has more than four non-blank lines; callers hide the section
/// when this is empty.
pub fn build_escalation_output(form: &FormState) -> String {
    let lines: Vec<&str> = form
        .part_order
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();

    if !form.more_than_4_parts || lines.len() <= ESCALATION_PART_THRESHOLD {
        return String::new();
    }

    let part_names: Vec<String> = lines.iter().map(|l| bare_part_name(l)).collect();

    format!(
        "Parts needed:\n{}\n\nWhy are more than 4 parts needed:\n{}",
        part_names.join("\n"),
        sanitize_multiline(&form.why_more_than_4)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectedTs;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    fn count_marks(text: &str, prefix: &str) -> usize {
        text.lines()
            .filter(|l| l.starts_with(prefix) && l.ends_with("[X]"))
            .count()
    }

    #[test]
    fn test_apf_ce_called_in_yes() {
        let form = FormState {
            ce_called_in: CeCalledIn::Yes,
            ..Default::default()
        };
        let out = build_apf_output(&form, at());
        assert!(out.contains("CE-Called-In-Yes:[X]"));
        assert!(out.contains("CE-Called-In-No:[ ]"));
        assert!(out.contains("CE-Called-In-NotRequired:[ ]"));
    }

    #[test]
    fn test_apf_exactly_one_ce_marker() {
        for value in CeCalledIn::ALL {
            let form = FormState {
                ce_called_in: value,
                ..Default::default()
            };
            let out = build_apf_output(&form, at());
            assert_eq!(count_marks(&out, "CE-Called-In-"), 1, "{value:?}");
        }
    }

    #[test]
    fn test_single_line_fields_cannot_add_marker_lines() {
        let form = FormState {
            ce_called_in: CeCalledIn::No,
            case_id: "123\nCE-Called-In-Yes:[X]".to_string(),
            apf_creator: "Kim\r\nMin-conf-yes:[X]".to_string(),
            model_description: "T14\nSporadic problem, replace ALL ordered parts under all circumstances [X]".to_string(),
            ..Default::default()
        };
        let apf = build_apf_output(&form, at());
        let marked: Vec<&str> = apf.lines().filter(|l| l.ends_with("[X]")).collect();
        assert_eq!(marked, vec!["CE-Called-In-No:[X]", "Min-conf-no:[X]"]);
        assert!(apf.starts_with("Case ID :123 CE-Called-In-Yes:[X]\nAPFCreator: Kim  Min-conf-yes:[X]\n"));

        let premier = build_premier_output(&form);
        let sporadic: Vec<&str> = premier
            .lines()
            .filter(|l| l.starts_with("Sporadic problem"))
            .collect();
        assert_eq!(
            sporadic,
            vec!["Sporadic problem, replace ALL ordered parts under all circumstances [ ]"]
        );
    }

    #[test]
    fn test_apf_header_and_timestamp() {
        let form = FormState {
            case_id: " 2027910571\u{0} ".to_string(),
            apf_creator: "M. Weber".to_string(),
            action_plan: ActionPlan::Passed,
            ..Default::default()
        };
        let out = build_apf_output(&form, at());
        assert!(out.starts_with("Case ID :2027910571\nAPFCreator: M. Weber\n"));
        assert!(out.contains("**** ACTION PLAN PASSED ****"));
        assert!(out.contains("Generated on: 07.03.2026 at 09:05"));
        assert!(out.ends_with("--- Ende ---"));
    }

    #[test]
    fn test_apf_resolves_ts_descriptions_and_appends_details() {
        let form = FormState {
            selected_ts: SelectedTs::from_labels(&["CMOS-RESET", "FAN-CHECK"]),
            additional_ts_details: "  swapped known-good dock ".to_string(),
            ..Default::default()
        };
        let out = build_apf_output(&form, at());
        assert!(out.contains(
            "APF TS performed: CMOS reset performed, Fan operation checked, swapped known-good dock\n"
        ));
    }

    #[test]
    fn test_apf_empty_ts_line() {
        let out = build_apf_output(&FormState::default(), at());
        assert!(out.contains("APF TS performed: \n"));
    }

    #[test]
    fn test_apf_min_conf_override() {
        let mut form = FormState {
            min_conf: YesNo::Yes,
            ..Default::default()
        };
        let out = build_apf_output(&form, at());
        assert!(out.contains("Min-conf-yes:[X]\nMin-conf-no:[ ]"));

        form.min_conf = YesNo::No;
        form.min_conf_ts = YesNo::Yes;
        let out = build_apf_output(&form, at());
        assert!(out.contains("Min-conf-yes:[X]\nMin-conf-no:[ ]"));

        form.min_conf_ts = YesNo::No;
        let out = build_apf_output(&form, at());
        assert!(out.contains("Min-conf-yes:[ ]\nMin-conf-no:[X]"));
    }

    #[test]
    fn test_apf_parts_not_picked_up_and_part_order() {
        let form = FormState {
            parts_not_picked_up: true,
            part_order: "RAM x 2 - kit A  \nSSD - 512GB".to_string(),
            ..Default::default()
        };
        let out = build_apf_output(&form, at());
        assert!(out.contains("[X] CE did not pick up parts within 5 days"));
        assert!(out.contains("Part order:\nRAM x 2 - kit A\nSSD - 512GB\n\nGenerated on:"));
    }

    #[test]
    fn test_premier_repeat_repair_markers_are_complementary() {
        for plan in [ActionPlan::Failed, ActionPlan::Passed, ActionPlan::NotApplicable] {
            let form = FormState {
                action_plan: plan,
                ..Default::default()
            };
            let out = build_premier_output(&form);
            let expected = if plan == ActionPlan::Failed {
                "Repeat Repair: Yes[X]  No[ ]"
            } else {
                "Repeat Repair: Yes[ ]  No[X]"
            };
            assert!(out.contains(expected), "{plan:?}");
        }
    }

    #[test]
    fn test_premier_uses_raw_labels() {
        let form = FormState {
            selected_ts: SelectedTs::from_labels(&["CMOS-RESET", "POST/BEEP"]),
            additional_ts_details: "bios beep 3x".to_string(),
            apf_creator: "J. Doe".to_string(),
            model_description: "ThinkPad T14 Gen 3".to_string(),
            sporadic_all_parts: true,
            ..Default::default()
        };
        let out = build_premier_output(&form);
        assert!(out.contains("ALREADY PERFORMED TROUBLESHOOTING: CMOS-RESET, POST/BEEP, bios beep 3x\n"));
        assert!(out.contains("Model description: ThinkPad T14 Gen 3"));
        assert!(out.contains("replace ALL ordered parts under all circumstances [X]"));
        assert!(out.ends_with("WO INITIATOR: J. Doe"));
        assert!(out.starts_with(RULE));
    }

    #[test]
    fn test_premier_details_without_labels() {
        let form = FormState {
            additional_ts_details: "reflashed EC".to_string(),
            ..Default::default()
        };
        let out = build_premier_output(&form);
        assert!(out.contains("ALREADY PERFORMED TROUBLESHOOTING: reflashed EC\n"));
    }

    fn five_parts() -> String {
        "MB/PLANAR -\nRAM x 2 - 8GB\n\nSSD - 512GB - NVMe\nLCD x 1\nnote about shipping".to_string()
    }

    #[test]
    fn test_escalation_needs_flag() {
        let form = FormState {
            part_order: format!("{}\nDOCK -", five_parts()),
            more_than_4_parts: false,
            ..Default::default()
        };
        assert_eq!(build_escalation_output(&form), "");
    }

    #[test]
    fn test_escalation_needs_more_than_four_lines() {
        let form = FormState {
            part_order: "MB/PLANAR -\n\nRAM -\nSSD -\nLCD -\n".to_string(),
            more_than_4_parts: true,
            ..Default::default()
        };
        assert_eq!(build_escalation_output(&form), "");
    }

    #[test]
    fn test_escalation_lists_bare_part_names() {
        let form = FormState {
            part_order: five_parts(),
            more_than_4_parts: true,
            why_more_than_4: "Liquid damage across\n  multiple boards ".to_string(),
            ..Default::default()
        };
        let out = build_escalation_output(&form);
        assert_eq!(
            out,
            "Parts needed:\nMB/PLANAR\nRAM\nSSD\nLCD\nnote about shipping\n\n\
             Why are more than 4 parts needed:\nLiquid damage across\nmultiple boards"
        );
    }

    #[test]
    fn test_bare_part_name() {
        assert_eq!(bare_part_name("RAM x 12 - kit"), "RAM");
        assert_eq!(bare_part_name("RAM X 3"), "RAM");
        assert_eq!(bare_part_name("BOX x"), "BOX x");
        assert_eq!(bare_part_name("SSD x2"), "SSD x2");
        assert_eq!(bare_part_name(" - leading dash"), "- leading dash");
        assert_eq!(bare_part_name("TP -"), "TP");
        assert_eq!(bare_part_name("RAM x 2 -"), "RAM");
    }
}
