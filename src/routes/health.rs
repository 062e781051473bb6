//! Health check endpoints for liveness and readiness probes.

use std::path::Path;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub projects_dir: String,
    pub results_dir: String,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks the project root and result store directories.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        projects_dir: dir_status(&state.config.projects_dir).await,
        results_dir: dir_status(state.results.dir()).await,
    })
}

async fn dir_status(path: &Path) -> String {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => "available".to_string(),
        Ok(_) => "error: not a directory".to_string(),
        // The result store creates its directory on first save.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => "missing".to_string(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Directory health check failed");
            format!("error: {e}")
        }
    }
}
