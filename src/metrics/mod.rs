//! Metric calculators normalizing raw scanner payloads.
//!
//! Each calculator implements the `MetricCalculator` trait, turning one
//! tool's raw JSON output into a `MetricResult` with canonical severity
//! buckets. Calculators never fail: unexpected shapes degrade to zero counts.

pub mod deepsource;
pub mod payload;
pub mod severity;
pub mod snyk;

use serde_json::Value;

use crate::models::metric::MetricResult;
use crate::models::tool::ScannerTool;

/// Trait for pluggable per-tool metric calculators.
pub trait MetricCalculator: Send + Sync {
    /// Human-readable tool name written into every result.
    fn tool_name(&self) -> &str;

    /// Normalize a raw payload into canonical metrics.
    fn calculate(&self, payload: &Value) -> MetricResult;
}

/// Select the calculator for a tool.
pub fn calculator_for(tool: ScannerTool) -> Box<dyn MetricCalculator> {
    match tool {
        ScannerTool::Snyk => Box::new(snyk::SnykCalculator::new()),
        ScannerTool::DeepSource => Box::new(deepsource::DeepSourceCalculator::new()),
    }
}
