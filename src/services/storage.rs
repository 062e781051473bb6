//! Raw scan result persistence as timestamped JSON files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

use crate::errors::{AppError, ScanError};

/// Accepts raw payloads and returns where they were stored.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn save(&self, payload: &Value, tool: &str, project: &str) -> Result<String, ScanError>;
}

/// Writes `<tool>_<project>_<YYYY-MM-DD_HH-MM-SS>.json` under one directory.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    dir: PathBuf,
}

impl FileResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Name of the most recent result file, by file name ordering.
    pub async fn latest(&self) -> Result<Option<String>, AppError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut latest: Option<String> = None;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if latest.as_deref().map_or(true, |current| name.as_str() > current) {
                latest = Some(name);
            }
        }
        Ok(latest)
    }

    /// Read a stored result by plain file name.
    pub async fn read(&self, name: &str) -> Result<Value, AppError> {
        if !is_plain_file_name(name) {
            return Err(AppError::Validation(format!("Invalid result file name '{name}'")));
        }
        let bytes = tokio::fs::read(self.dir.join(name)).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Internal(format!("Stored result {name} is not JSON: {e}")))
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn save(&self, payload: &Value, tool: &str, project: &str) -> Result<String, ScanError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ScanError::Storage(format!("{}: {e}", self.dir.display())))?;

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let file_path = self.dir.join(format!("{tool}_{project}_{timestamp}.json"));

        let body = serde_json::to_vec_pretty(payload)
            .map_err(|e| ScanError::Storage(e.to_string()))?;
        tokio::fs::write(&file_path, body)
            .await
            .map_err(|e| ScanError::Storage(format!("{}: {e}", file_path.display())))?;

        let location = file_path.display().to_string();
        tracing::info!(location = %location, tool = %tool, project = %project, "Scan result saved");
        Ok(location)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().is_some()
}
