//! Axum route handlers for generating and exporting reports.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use tracing::info;

use crate::errors::AppError;
use crate::report::{export_filename, OutputBundle, ReportKind};
use crate::state::AppState;

/// POST /api/v1/forms/:profile/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(profile): Path<String>,
) -> Result<Json<OutputBundle>, AppError> {
    let session = state.sessions.get(&profile).await?;
    let mut session = session.lock().await;
    Ok(Json(session.generate().await))
}

/// GET /api/v1/forms/:profile/outputs
///
/// Last generated bundle; 404 until the first generation.
pub async fn handle_get_outputs(
    State(state): State<AppState>,
    Path(profile): Path<String>,
) -> Result<Json<OutputBundle>, AppError> {
    let session = state.sessions.get(&profile).await?;
    let session = session.lock().await;
    session
        .outputs()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no reports generated for profile {profile}")))
}

/// GET /api/v1/forms/:profile/export/:report
///
/// Downloads one report as a `.txt` attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((profile, report)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let kind = ReportKind::from_slug(&report)
        .ok_or_else(|| AppError::NotFound(format!("unknown report '{report}'")))?;

    let session = state.sessions.get(&profile).await?;
    let session = session.lock().await;
    let bundle = session.outputs().await.unwrap_or_default();
    let text = kind
        .content(&bundle)
        .ok_or_else(|| AppError::NotFound(format!("{} has no content to export", kind.title())))?
        .to_string();

    let filename = export_filename(kind, &session.form().case_id, Local::now().naive_local());
    info!("Exporting {} for profile {profile} as {filename}", kind.title());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        text,
    )
        .into_response())
}
