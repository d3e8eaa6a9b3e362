//! Axum route handlers for editing a profile's form.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{filter_ts_actions, PartName, TsAction};
use crate::errors::AppError;
use crate::form::FormPatch;
use crate::part_order::{decode, editor};
use crate::session::SessionView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PartRequest {
    pub part: PartName,
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    pub part: PartName,
    pub delta: i64,
}

/// Quantity as typed into the prompt; non-numeric text is ignored.
#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub part: PartName,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SetDetailRequest {
    pub part: PartName,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct TsToggleRequest {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectAllRequest {
    /// Search text; falls back to the form's own TS search field.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartChip {
    pub part: PartName,
    pub label: &'static str,
    pub selected: bool,
    pub quantity: Option<u32>,
    pub detail: Option<String>,
    pub prompts_quantity: bool,
}

/// Chip projection of the part-order box.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartOrderView {
    pub chips: Vec<PartChip>,
    pub unknown_lines: Vec<String>,
    pub parts_count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Form
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/forms/:profile
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path(profile): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(&profile).await?;
    let session = session.lock().await;
    Ok(Json(session.view().await))
}

/// PATCH /api/v1/forms/:profile
pub async fn handle_patch_form(
    State(state): State<AppState>,
    Path(profile): Path<String>,
    Json(patch): Json<FormPatch>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(&profile).await?;
    let mut session = session.lock().await;
    session.update(patch).await;
    Ok(Json(session.view().await))
}

/// POST /api/v1/forms/:profile/reset
pub async fn handle_reset_form(
    State(state): State<AppState>,
    Path(profile): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(&profile).await?;
    let mut session = session.lock().await;
    session.reset().await;
    Ok(Json(session.view().await))
}

// ────────────────────────────────────────────────────────────────────────────
// Part chips
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/forms/:profile/parts
pub async fn handle_get_parts(
    State(state): State<AppState>,
    Path(profile): Path<String>,
) -> Result<Json<PartOrderView>, AppError> {
    let session = state.sessions.get(&profile).await?;
    let session = session.lock().await;
    let text = &session.form().part_order;
    let order = decode(text);

    let chips = PartName::ALL
        .into_iter()
        .map(|part| {
            let entry = order.entries.get(&part);
            PartChip {
                part,
                label: part.label(),
                selected: entry.is_some(),
                quantity: entry.map(|e| e.quantity),
                detail: entry.map(|e| e.detail.clone()),
                prompts_quantity: part.prompts_quantity(),
            }
        })
        .collect();

    Ok(Json(PartOrderView {
        chips,
        unknown_lines: order.unknown_lines,
        parts_count: session.form().parts_count(),
    }))
}

async fn edit_part_order(
    state: &AppState,
    profile: &str,
    edit: impl FnOnce(&str) -> String,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(profile).await?;
    let mut session = session.lock().await;
    session
        .edit(|form| form.part_order = edit(&form.part_order))
        .await;
    Ok(Json(session.view().await))
}

/// POST /api/v1/forms/:profile/parts/toggle
pub async fn handle_toggle_part(
    State(state): State<AppState>,
    Path(profile): Path<String>,
    Json(req): Json<PartRequest>,
) -> Result<Json<SessionView>, AppError> {
    edit_part_order(&state, &profile, |text| editor::toggle_part(text, req.part)).await
}

/// POST /api/v1/forms/:profile/parts/adjust
pub async fn handle_adjust_quantity(
    State(state): State<AppState>,
    Path(profile): Path<String>,
    Json(req): Json<AdjustQuantityRequest>,
) -> Result<Json<SessionView>, AppError> {
    edit_part_order(&state, &profile, |text| {
        editor::adjust_quantity(text, req.part, req.delta)
    })
    .await
}

/// POST /api/v1/forms/:profile/parts/quantity
pub async fn handle_set_quantity(
    State(state): State<AppState>,
    Path(profile): Path<String>,
    Json(req): Json<SetQuantityRequest>,
) -> Result<Json<SessionView>, AppError> {
    edit_part_order(&state, &profile, |text| {
        editor::set_quantity(text, req.part, &req.value)
    })
    .await
}

/// POST /api/v1/forms/:profile/parts/remove
pub async fn handle_remove_part(
    State(state): State<AppState>,
    Path(profile): Path<String>,
    Json(req): Json<PartRequest>,
) -> Result<Json<SessionView>, AppError> {
    edit_part_order(&state, &profile, |text| editor::remove_part(text, req.part)).await
}

/// POST /api/v1/forms/:profile/parts/detail
pub async fn handle_set_detail(
    State(state): State<AppState>,
    Path(profile): Path<String>,
    Json(req): Json<SetDetailRequest>,
) -> Result<Json<SessionView>, AppError> {
    edit_part_order(&state, &profile, |text| {
        editor::set_detail(text, req.part, &req.detail)
    })
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Troubleshooting chips
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/forms/:profile/ts/toggle
pub async fn handle_toggle_ts(
    State(state): State<AppState>,
    Path(profile): Path<String>,
    Json(req): Json<TsToggleRequest>,
) -> Result<Json<SessionView>, AppError> {
    let action = TsAction::from_label(&req.label).ok_or_else(|| {
        AppError::Validation(format!("unknown troubleshooting action '{}'", req.label))
    })?;

    let session = state.sessions.get(&profile).await?;
    let mut session = session.lock().await;
    session.edit(|form| form.selected_ts.toggle(action)).await;
    Ok(Json(session.view().await))
}

/// POST /api/v1/forms/:profile/ts/select-all
///
/// Adds every action visible under the search text to the selection.
pub async fn handle_select_all_ts(
    State(state): State<AppState>,
    Path(profile): Path<String>,
    Json(req): Json<SelectAllRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(&profile).await?;
    let mut session = session.lock().await;
    let query = req.query.unwrap_or_else(|| session.form().ts_search.clone());
    let visible = filter_ts_actions(&query);
    session.edit(|form| form.selected_ts.select_all(visible)).await;
    Ok(Json(session.view().await))
}

/// POST /api/v1/forms/:profile/ts/clear
pub async fn handle_clear_ts(
    State(state): State<AppState>,
    Path(profile): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(&profile).await?;
    let mut session = session.lock().await;
    session.edit(|form| form.selected_ts.clear()).await;
    Ok(Json(session.view().await))
}
