//! Project registry listing.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::project::ProjectInfo;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectListing {
    pub available_projects: Vec<String>,
    pub projects: Vec<ProjectInfo>,
}

/// GET /api/v1/projects — registered projects and whether each exists on disk.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProjectListing>>, AppError> {
    let registry = state.registry();
    Ok(ApiResponse::success(ProjectListing {
        available_projects: registry.names().to_vec(),
        projects: registry.list(),
    }))
}
