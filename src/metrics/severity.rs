//! Severity vocabularies and the mapping into canonical buckets.
//!
//! Each tool's vocabulary is plain data; [`SeverityTable::bucket`] is the only
//! lookup routine.

use crate::models::metric::SeverityBucket;

/// A literal-to-bucket vocabulary plus the policy for unrecognized labels.
#[derive(Debug, Clone, Copy)]
pub struct SeverityTable {
    pub entries: &'static [(&'static str, SeverityBucket)],
    /// Compare labels ignoring ASCII case.
    pub case_insensitive: bool,
    /// Bucket for unrecognized labels. `None` drops them.
    pub fallback: Option<SeverityBucket>,
}

impl SeverityTable {
    /// Labels are matched as given; surrounding whitespace is not stripped.
    pub fn bucket(&self, label: &str) -> Option<SeverityBucket> {
        self.entries
            .iter()
            .find(|(literal, _)| {
                if self.case_insensitive {
                    literal.eq_ignore_ascii_case(label)
                } else {
                    *literal == label
                }
            })
            .map(|(_, bucket)| *bucket)
            .or(self.fallback)
    }
}

/// DeepSource CLI labels.
pub const DEEPSOURCE_LABELS: SeverityTable = SeverityTable {
    entries: &[
        ("critical", SeverityBucket::Critical),
        ("blocker", SeverityBucket::Critical),
        ("error", SeverityBucket::Critical),
        ("high", SeverityBucket::High),
        ("major", SeverityBucket::High),
        ("medium", SeverityBucket::Medium),
        ("minor", SeverityBucket::Medium),
        ("warning", SeverityBucket::Medium),
        ("low", SeverityBucket::Low),
        ("info", SeverityBucket::Low),
        ("suggestion", SeverityBucket::Low),
    ],
    case_insensitive: true,
    fallback: Some(SeverityBucket::Medium),
};

/// DeepSource GraphQL API severities.
pub const DEEPSOURCE_GRAPHQL: SeverityTable = SeverityTable {
    entries: &[
        ("CRITICAL", SeverityBucket::Critical),
        ("MAJOR", SeverityBucket::High),
        ("MINOR", SeverityBucket::Medium),
        ("INFO", SeverityBucket::Low),
    ],
    case_insensitive: true,
    fallback: Some(SeverityBucket::Medium),
};

/// Snyk legacy `vulnerabilities[].severity`, already canonical.
///
/// Anything else is dropped rather than defaulted.
pub const SNYK_LEGACY: SeverityTable = SeverityTable {
    entries: &[
        ("critical", SeverityBucket::Critical),
        ("high", SeverityBucket::High),
        ("medium", SeverityBucket::Medium),
        ("low", SeverityBucket::Low),
    ],
    case_insensitive: false,
    fallback: None,
};

/// SARIF result levels used when Snyk reports no priority score.
pub const SARIF_LEVELS: SeverityTable = SeverityTable {
    entries: &[
        ("error", SeverityBucket::High),
        ("warning", SeverityBucket::Medium),
    ],
    case_insensitive: true,
    fallback: Some(SeverityBucket::Low),
};

/// Bucket a Snyk priority score. Thresholds are inclusive lower bounds.
pub fn bucket_priority_score(score: f64) -> SeverityBucket {
    if score >= 900.0 {
        SeverityBucket::Critical
    } else if score >= 700.0 {
        SeverityBucket::High
    } else if score >= 500.0 {
        SeverityBucket::Medium
    } else {
        SeverityBucket::Low
    }
}
