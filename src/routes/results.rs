//! Stored raw scan results.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::errors::{ApiResponse, AppError};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StoredResult {
    pub file_name: String,
    pub content: Value,
}

/// GET /api/v1/results/latest — most recently stored raw result.
pub async fn latest(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StoredResult>>, AppError> {
    let file_name = state
        .results
        .latest()
        .await?
        .ok_or_else(|| AppError::NotFound("No scan results stored yet".to_string()))?;
    let content = state.results.read(&file_name).await?;
    Ok(ApiResponse::success(StoredResult { file_name, content }))
}

/// GET /api/v1/results/{name} — one stored raw result by file name.
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<StoredResult>>, AppError> {
    let content = state.results.read(&name).await.map_err(|e| {
        if e.is_not_found() {
            AppError::NotFound(format!("Result file '{name}' not found"))
        } else {
            e
        }
    })?;
    Ok(ApiResponse::success(StoredResult {
        file_name: name,
        content,
    }))
}
