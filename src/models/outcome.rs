//! Per-project scan outcomes and their batch aggregate.

use serde::{Deserialize, Serialize};

use crate::models::metric::MetricResult;

/// Result of one orchestration run for one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanOutcome {
    pub success: bool,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_result: Option<MetricResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanOutcome {
    pub fn succeeded(project: &str, file_path: String, metric_result: MetricResult) -> Self {
        Self {
            success: true,
            project: project.to_string(),
            file_path: Some(file_path),
            metric_result: Some(metric_result),
            error: None,
        }
    }

    pub fn failed(project: &str, error: String) -> Self {
        Self {
            success: false,
            project: project.to_string(),
            file_path: None,
            metric_result: None,
            error: Some(error),
        }
    }
}

/// Outcome of scanning every registered project.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub message: String,
    pub succeeded: usize,
    pub total: usize,
    pub results: Vec<ScanOutcome>,
}

impl BatchReport {
    pub fn new(results: Vec<ScanOutcome>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        let total = results.len();
        Self {
            message: format!("Scanned {succeeded}/{total} projects"),
            succeeded,
            total,
            results,
        }
    }

    /// A batch succeeds when at least one project did.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }
}
