//! Unified error handling with consistent API response envelope.
//!
//! `ScanError` is the typed failure of the acquisition pipeline; `AppError`
//! is what route handlers return and maps onto HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        })
    }
}

/// Failure raised while acquiring or storing a scan.
///
/// Acquisition strategies classify their failures with these variants; the
/// strategy chain uses [`ScanError::falls_through`] to decide whether the next
/// strategy gets a turn.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("{tool} executable not found: {program}")]
    ExecutableNotFound { tool: String, program: String },

    #[error("{tool} {strategy} strategy unavailable: {reason}")]
    StrategyUnavailable {
        tool: String,
        strategy: String,
        reason: String,
    },

    #[error("{tool} scan timeout (exceeded {secs} seconds)")]
    ExecutionTimeout { tool: String, secs: u64 },

    #[error("{tool} CLI error: {message}")]
    ToolExecution { tool: String, message: String },

    #[error("{tool} produced malformed output: {message}")]
    MalformedOutput { tool: String, message: String },

    #[error("{tool} API request failed: {message}")]
    RemoteTransport { tool: String, message: String },

    #[error("{tool} API error: {message}")]
    RemoteError { tool: String, message: String },

    #[error("Project '{project}' {reason}")]
    ProjectNotFound { project: String, reason: String },

    #[error("{tool}: no acquisition strategy succeeded (tried: {attempted})")]
    AllStrategiesExhausted { tool: String, attempted: String },

    #[error("Failed to store scan result: {0}")]
    Storage(String),
}

impl ScanError {
    /// Whether the strategy chain may continue with the next strategy.
    pub fn falls_through(&self) -> bool {
        matches!(
            self,
            Self::ExecutableNotFound { .. } | Self::StrategyUnavailable { .. }
        )
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scan failed for {project}: {message}")]
    ScanFailed { project: String, message: String },

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::ScanFailed { project, message } => {
                tracing::warn!(project = %project, error = %message, "Scan failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SCAN_FAILED",
                    message.clone(),
                )
            }
            AppError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Result file not found".to_string(),
            ),
            AppError::Io(e) => {
                tracing::error!(error = %e, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, ApiResponse::<()>::error(code, &message)).into_response()
    }
}
