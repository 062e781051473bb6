use std::path::PathBuf;

use serde::Serialize;

/// A validated, existing project ready to be scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanTarget {
    pub name: String,
    pub path: PathBuf,
}

/// Registry entry for the project listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub name: String,
    pub exists: bool,
    pub path: String,
}
