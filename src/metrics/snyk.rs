//! Snyk Code metric calculator supporting SARIF and legacy JSON output.
//!
//! SARIF results are bucketed by `properties.priorityScore` when present and
//! by `level` otherwise. The legacy `vulnerabilities` array already carries
//! canonical severities; entries outside that vocabulary are not counted.

use serde_json::Value;

use crate::metrics::payload::{array_at, as_number, first_positive_number, get_path, str_field};
use crate::metrics::severity::{bucket_priority_score, SARIF_LEVELS, SNYK_LEGACY};
use crate::metrics::MetricCalculator;
use crate::models::metric::{MetricResult, SeverityBucket, SeverityCounts};

const DURATION_KEYS: &[&str] = &["scanDuration", "duration", "time"];

/// Snyk Code calculator instance.
#[derive(Debug, Default)]
pub struct SnykCalculator;

impl SnykCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl MetricCalculator for SnykCalculator {
    fn tool_name(&self) -> &str {
        "Snyk Code"
    }

    fn calculate(&self, payload: &Value) -> MetricResult {
        let runs = array_at(payload, &["runs"]);
        match runs.first() {
            Some(first_run) => self.calculate_sarif(first_run),
            None => self.calculate_legacy(payload),
        }
    }
}

impl SnykCalculator {
    fn calculate_sarif(&self, run: &Value) -> MetricResult {
        let counts: SeverityCounts = array_at(run, &["results"])
            .iter()
            .map(sarif_result_bucket)
            .collect();

        // SARIF output carries no scan timing.
        MetricResult::from_counts(self.tool_name(), counts, 0.0)
    }

    fn calculate_legacy(&self, payload: &Value) -> MetricResult {
        let counts: SeverityCounts = array_at(payload, &["vulnerabilities"])
            .iter()
            .filter_map(|vuln| str_field(vuln, "severity"))
            .filter_map(|severity| SNYK_LEGACY.bucket(severity))
            .collect();

        MetricResult::from_counts(
            self.tool_name(),
            counts,
            first_positive_number(payload, DURATION_KEYS),
        )
    }
}

/// Priority score wins when positive; otherwise fall back to the SARIF level.
fn sarif_result_bucket(result: &Value) -> SeverityBucket {
    let score = get_path(result, &["properties", "priorityScore"])
        .and_then(as_number)
        .unwrap_or(0.0);

    if score > 0.0 {
        return bucket_priority_score(score);
    }

    let level = str_field(result, "level").unwrap_or("error");
    SARIF_LEVELS.bucket(level).unwrap_or(SeverityBucket::Low)
}
