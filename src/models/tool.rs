//! Supported scanner tools.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A third-party scanner this service knows how to drive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScannerTool {
    Snyk,
    #[serde(rename = "deepsource")]
    DeepSource,
}

impl ScannerTool {
    pub const ALL: [ScannerTool; 2] = [ScannerTool::Snyk, ScannerTool::DeepSource];

    /// Human-readable name reported as `tool_name` in metric results.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Snyk => "Snyk Code",
            Self::DeepSource => "DeepSource",
        }
    }

    /// Prefix used for stored raw result files.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Snyk => "snyk_code",
            Self::DeepSource => "deepsource",
        }
    }
}

impl std::fmt::Display for ScannerTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snyk => write!(f, "snyk"),
            Self::DeepSource => write!(f, "deepsource"),
        }
    }
}

impl FromStr for ScannerTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snyk" | "snyk_code" | "code" => Ok(Self::Snyk),
            "deepsource" => Ok(Self::DeepSource),
            other => Err(format!(
                "Unknown scanner '{other}'. Supported: snyk, deepsource"
            )),
        }
    }
}
