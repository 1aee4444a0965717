use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{AppState, database, error::{AppError, Result}};

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Ready once the database answers and the upload root is a directory.
pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse> {
    database::check_health(&state.db).await?;

    let uploads = tokio::fs::metadata(state.uploads.root()).await?;
    if !uploads.is_dir() {
        return Err(AppError::InternalError(format!(
            "Upload root {} is not a directory",
            state.uploads.root().display()
        )));
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "database": "connected",
            "uploads": state.uploads.root().display().to_string(),
        })),
    ))
}
