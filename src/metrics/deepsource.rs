//! DeepSource metric calculator for GraphQL API responses and CLI output.
//!
//! GraphQL responses nest issues under
//! `data.repository.issues.edges[].node.issue` and use the
//! `CRITICAL/MAJOR/MINOR/INFO` vocabulary. CLI and stand-in output keep a flat
//! issue list under one of several candidate keys. Unrecognized severities
//! count as medium in both shapes.

use serde_json::Value;

use crate::metrics::payload::{array_at, first_array, first_positive_number, get_path, str_field};
use crate::metrics::severity::{SeverityTable, DEEPSOURCE_GRAPHQL, DEEPSOURCE_LABELS};
use crate::metrics::MetricCalculator;
use crate::models::metric::{MetricResult, SeverityBucket, SeverityCounts};

const ISSUE_KEYS: &[&str] = &["issues", "results", "findings", "violations"];
const DURATION_KEYS: &[&str] = &["scan_duration", "duration", "time"];
const EDGES_PATH: &[&str] = &["data", "repository", "issues", "edges"];

/// DeepSource calculator instance.
#[derive(Debug, Default)]
pub struct DeepSourceCalculator;

impl DeepSourceCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl MetricCalculator for DeepSourceCalculator {
    fn tool_name(&self) -> &str {
        "DeepSource"
    }

    fn calculate(&self, payload: &Value) -> MetricResult {
        if payload.get("data").is_some() {
            let issues = graphql_issues(payload);
            let counts = tally(issues, &DEEPSOURCE_GRAPHQL);
            // The GraphQL API reports no scan timing.
            return MetricResult::from_counts(self.tool_name(), counts, 0.0);
        }

        let issues = first_array(payload, ISSUE_KEYS).iter();
        MetricResult::from_counts(
            self.tool_name(),
            tally(issues, &DEEPSOURCE_LABELS),
            first_positive_number(payload, DURATION_KEYS),
        )
    }
}

/// Issue objects from a GraphQL response; edges without `node.issue` are skipped.
fn graphql_issues(payload: &Value) -> impl Iterator<Item = &Value> {
    array_at(payload, EDGES_PATH)
        .iter()
        .filter_map(|edge| get_path(edge, &["node", "issue"]))
}

fn tally<'a>(issues: impl Iterator<Item = &'a Value>, table: &SeverityTable) -> SeverityCounts {
    issues
        .map(|issue| {
            let severity = str_field(issue, "severity").unwrap_or("");
            table.bucket(severity).unwrap_or(SeverityBucket::Medium)
        })
        .collect()
}
