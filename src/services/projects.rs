//! Fixed registry of scan target projects.

use std::path::{Path, PathBuf};

use crate::errors::ScanError;
use crate::models::project::{ProjectInfo, ScanTarget};

/// Ordered list of known projects rooted at one directory.
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    root: PathBuf,
    names: Vec<String>,
}

impl ProjectRegistry {
    pub fn new(root: impl Into<PathBuf>, names: Vec<String>) -> Self {
        Self {
            root: root.into(),
            names,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Validate that `name` is registered and its directory exists.
    pub fn resolve(&self, name: &str) -> Result<ScanTarget, ScanError> {
        if !self.contains(name) {
            return Err(ScanError::ProjectNotFound {
                project: name.to_string(),
                reason: format!(
                    "is not a registered project. Available projects: {}",
                    self.names.join(", ")
                ),
            });
        }

        let path = self.path_for(name);
        if !path.is_dir() {
            return Err(ScanError::ProjectNotFound {
                project: name.to_string(),
                reason: format!("not found in {}", display_root(&self.root)),
            });
        }

        Ok(ScanTarget {
            name: name.to_string(),
            path,
        })
    }

    pub fn list(&self) -> Vec<ProjectInfo> {
        self.names
            .iter()
            .map(|name| {
                let path = self.path_for(name);
                ProjectInfo {
                    name: name.clone(),
                    exists: path.is_dir(),
                    path: path.display().to_string(),
                }
            })
            .collect()
    }
}

fn display_root(root: &Path) -> String {
    format!("{}/", root.display())
}
