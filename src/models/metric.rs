//! Canonical severity buckets and the normalized metric result shared by all tools.

use serde::{Deserialize, Serialize};

/// One of the four canonical severity buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBucket {
    Critical,
    High,
    Medium,
    Low,
}

/// Running per-bucket tally for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl SeverityCounts {
    pub fn record(&mut self, bucket: SeverityBucket) {
        match bucket {
            SeverityBucket::Critical => self.critical += 1,
            SeverityBucket::High => self.high += 1,
            SeverityBucket::Medium => self.medium += 1,
            SeverityBucket::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.critical + self.high + self.medium + self.low
    }
}

impl FromIterator<SeverityBucket> for SeverityCounts {
    fn from_iter<I: IntoIterator<Item = SeverityBucket>>(iter: I) -> Self {
        let mut counts = Self::default();
        for bucket in iter {
            counts.record(bucket);
        }
        counts
    }
}

/// Normalized scan metrics.
///
/// Only constructed from a [`SeverityCounts`] tally, so
/// `critical + high + medium + low == total_issues` always holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricResult {
    pub tool_name: String,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub total_issues: u64,
    pub scan_duration: f64,
}

impl MetricResult {
    pub fn from_counts(tool_name: &str, counts: SeverityCounts, scan_duration: f64) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            critical: counts.critical,
            high: counts.high,
            medium: counts.medium,
            low: counts.low,
            total_issues: counts.total(),
            scan_duration: if scan_duration.is_finite() && scan_duration > 0.0 {
                scan_duration
            } else {
                0.0
            },
        }
    }
}
