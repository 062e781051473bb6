//! Fixed stand-in payloads for when no real scanner is reachable.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::acquisition::AcquisitionStrategy;
use crate::errors::ScanError;
use crate::models::project::ScanTarget;
use crate::models::tool::ScannerTool;

/// Always succeeds with a tool-shaped sample payload.
#[derive(Debug, Clone)]
pub struct StandInStrategy {
    tool: ScannerTool,
}

impl StandInStrategy {
    pub fn new(tool: ScannerTool) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl AcquisitionStrategy for StandInStrategy {
    fn name(&self) -> &str {
        "stand-in"
    }

    async fn attempt(&self, target: &ScanTarget) -> Result<Value, ScanError> {
        tracing::warn!(
            tool = %self.tool,
            project = %target.name,
            "Scanner CLI/API not available, returning stand-in data; these are not real findings"
        );
        Ok(stand_in_payload(self.tool))
    }
}

/// The fixed payload for `tool`. Independent of the project.
pub fn stand_in_payload(tool: ScannerTool) -> Value {
    match tool {
        ScannerTool::DeepSource => json!({
            "issues": [
                {
                    "severity": "high",
                    "issue_code": "DS-PY-001",
                    "message": "Stand-in DeepSource issue - High severity",
                    "file": "app.py",
                    "line": 10
                },
                {
                    "severity": "medium",
                    "issue_code": "DS-PY-002",
                    "message": "Stand-in DeepSource issue - Medium severity",
                    "file": "app.py",
                    "line": 20
                }
            ],
            "scan_duration": 5.2,
            "total_issues": 2
        }),
        ScannerTool::Snyk => json!({
            "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {"driver": {"name": "SnykCode", "version": "stand-in"}},
                "results": [
                    {
                        "ruleId": "python/Sqli",
                        "level": "error",
                        "message": {"text": "Stand-in Snyk Code issue - SQL injection"},
                        "locations": [{
                            "physicalLocation": {
                                "artifactLocation": {"uri": "app.py"},
                                "region": {"startLine": 10}
                            }
                        }],
                        "properties": {"priorityScore": 910}
                    },
                    {
                        "ruleId": "python/HardcodedSecret",
                        "level": "warning",
                        "message": {"text": "Stand-in Snyk Code issue - Hardcoded secret"},
                        "locations": [{
                            "physicalLocation": {
                                "artifactLocation": {"uri": "config.py"},
                                "region": {"startLine": 3}
                            }
                        }],
                        "properties": {"priorityScore": 640}
                    }
                ]
            }]
        }),
    }
}
