//! Read-only catalog endpoints backing the chip grids.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::catalog::{filter_ts_actions, PartName};
use crate::form::{ActionPlan, CeCalledIn, YesNo};
use crate::report::ReportKind;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartInfo {
    pub part: PartName,
    pub label: &'static str,
    pub prompts_quantity: bool,
}

#[derive(Debug, Serialize)]
pub struct TsInfo {
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct TsQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/v1/catalog/parts
pub async fn handle_list_parts() -> Json<Vec<PartInfo>> {
    Json(
        PartName::ALL
            .into_iter()
            .map(|part| PartInfo {
                part,
                label: part.label(),
                prompts_quantity: part.prompts_quantity(),
            })
            .collect(),
    )
}

/// GET /api/v1/catalog/troubleshooting?q=
///
/// Case-insensitive search over labels and descriptions.
pub async fn handle_list_ts(Query(query): Query<TsQuery>) -> Json<Vec<TsInfo>> {
    Json(
        filter_ts_actions(&query.q)
            .into_iter()
            .map(|action| TsInfo {
                label: action.label(),
                description: action.description(),
            })
            .collect(),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInfo {
    pub report: ReportKind,
    pub title: &'static str,
    pub file_prefix: &'static str,
}

/// Allowed values for the enumerated form fields, in display order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOptions {
    pub action_plan: [ActionPlan; 3],
    pub ce_called_in: [CeCalledIn; 3],
    pub yes_no: [YesNo; 2],
}

/// GET /api/v1/catalog/reports
pub async fn handle_list_reports() -> Json<Vec<ReportInfo>> {
    Json(
        ReportKind::ALL
            .into_iter()
            .map(|report| ReportInfo {
                report,
                title: report.title(),
                file_prefix: report.file_prefix(),
            })
            .collect(),
    )
}

/// GET /api/v1/catalog/options
pub async fn handle_list_options() -> Json<FieldOptions> {
    Json(FieldOptions {
        action_plan: ActionPlan::ALL,
        ce_called_in: CeCalledIn::ALL,
        yes_no: YesNo::ALL,
    })
}
