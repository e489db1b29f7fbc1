use axum::{
    Json,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::pipeline::{extract_report, render};
use crate::report::Report;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub idusuario: Option<String>,
}

/// HTML viewer. Always resolves to a full document: either the rendered
/// report or an error page, never a blank 200.
pub async fn view_report(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Response {
    match load_report(&state, params.idusuario.as_deref()).await {
        Ok(report) => Html(render::render_report(&report)).into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Html(render::render_error(&err.user_message()))).into_response()
        }
    }
}

/// Same pipeline, normalized report as JSON.
pub async fn get_report(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> AppResult<Json<Report>> {
    let report = load_report(&state, params.idusuario.as_deref()).await?;
    Ok(Json(report))
}

async fn load_report(state: &AppState, user_id: Option<&str>) -> Result<Report, AppError> {
    let user_id = user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(AppError::MissingIdentifier)?;

    let raw = state
        .reports
        .fetch_latest_report(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No report found for user {user_id}.")))?;

    extract_report(&raw)
}
