//! Scan routes: run one tool against one project or the whole registry.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::outcome::{BatchReport, ScanOutcome};
use crate::models::tool::ScannerTool;
use crate::services::scan::ScanOrchestrator;
use crate::AppState;

/// Project used when the request names none.
pub const DEFAULT_PROJECT: &str = "flask_demo";

/// Project selection, from a JSON body or the query string.
///
/// An empty project name counts as absent.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(max = 128))]
    pub project: Option<String>,
}

impl ScanRequest {
    fn into_project(self) -> Option<String> {
        self.project.filter(|p| !p.is_empty())
    }
}

/// POST /api/v1/scans/{tool} — scan one registered project.
pub async fn scan_project(
    State(state): State<AppState>,
    Path(tool): Path<String>,
    Query(query): Query<ScanRequest>,
    body: Bytes,
) -> Result<Json<ApiResponse<ScanOutcome>>, AppError> {
    let orchestrator = lookup(&state, &tool)?;
    let request = parse_body(&body)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let project = select_project(request, query);

    let registry = orchestrator.registry();
    if !registry.contains(&project) {
        return Err(AppError::Validation(format!(
            "Invalid project '{project}'. Available projects: {}",
            registry.names().join(", ")
        )));
    }

    tracing::info!(tool = %orchestrator.tool(), project = %project, "Scan requested");
    let outcome = orchestrator.scan_project(&project).await;
    if !outcome.success {
        return Err(AppError::ScanFailed {
            message: outcome.error.unwrap_or_else(|| "Scan failed".to_string()),
            project,
        });
    }
    Ok(ApiResponse::success(outcome))
}

/// POST /api/v1/scans/{tool}/all — scan every registered project in order.
pub async fn scan_all(
    State(state): State<AppState>,
    Path(tool): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<BatchReport>>), AppError> {
    let orchestrator = lookup(&state, &tool)?;
    let report = orchestrator.scan_all().await;
    let status = if report.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, ApiResponse::success(report)))
}

fn lookup<'a>(state: &'a AppState, tool: &str) -> Result<&'a ScanOrchestrator, AppError> {
    let tool: ScannerTool = tool
        .parse()
        .map_err(|_| AppError::NotFound(format!("Unknown scanner tool '{tool}'")))?;
    state.orchestrator(tool)
}

/// Body first, then query string, then the default project.
fn select_project(body: ScanRequest, query: ScanRequest) -> String {
    body.into_project()
        .or_else(|| query.into_project())
        .unwrap_or_else(|| DEFAULT_PROJECT.to_string())
}

fn parse_body(body: &[u8]) -> Result<ScanRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ScanRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}
