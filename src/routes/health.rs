use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "maturity-report-viewer",
        "version": "1.0.0",
        "environment": state.config.environment,
    }))
}
