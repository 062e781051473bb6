//! Local analyzer invocation with captured output and a hard timeout.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;

use crate::acquisition::AcquisitionStrategy;
use crate::config::{DeepSourceConfig, SnykConfig};
use crate::errors::ScanError;
use crate::models::project::ScanTarget;
use crate::models::tool::ScannerTool;

/// Placeholder in argument templates replaced with the project path.
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// Runs a scanner executable against the project directory.
#[derive(Debug, Clone)]
pub struct LocalProcessStrategy {
    tool: ScannerTool,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl LocalProcessStrategy {
    pub fn new(tool: ScannerTool, program: &str, args: &[&str], timeout: Duration) -> Self {
        Self {
            tool,
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout,
        }
    }

    /// `snyk code test <path> --json`
    pub fn snyk(config: &SnykConfig, timeout: Duration) -> Self {
        Self::new(
            ScannerTool::Snyk,
            &config.cli_path,
            &["code", "test", TARGET_PLACEHOLDER, "--json"],
            timeout,
        )
    }

    /// `deepsource analyze <path> --format json`
    pub fn deepsource(config: &DeepSourceConfig, timeout: Duration) -> Self {
        Self::new(
            ScannerTool::DeepSource,
            &config.cli_path,
            &["analyze", TARGET_PLACEHOLDER, "--format", "json"],
            timeout,
        )
    }

    fn command_args(&self, target: &ScanTarget) -> Vec<String> {
        let path = target.path.display().to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(TARGET_PLACEHOLDER, &path))
            .collect()
    }

    fn tool_name(&self) -> String {
        self.tool.display_name().to_string()
    }
}

#[async_trait]
impl AcquisitionStrategy for LocalProcessStrategy {
    fn name(&self) -> &str {
        "local-process"
    }

    async fn attempt(&self, target: &ScanTarget) -> Result<Value, ScanError> {
        let args = self.command_args(target);
        tracing::debug!(
            tool = %self.tool,
            program = %self.program,
            args = ?args,
            "Running local analyzer"
        );

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScanError::ExecutableNotFound {
                    tool: self.tool_name(),
                    program: self.program.clone(),
                });
            }
            Err(e) => {
                return Err(ScanError::ToolExecution {
                    tool: self.tool_name(),
                    message: format!("failed to start {}: {e}", self.program),
                });
            }
        };

        // Dropping the pending future on timeout kills the child.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ScanError::ToolExecution {
                    tool: self.tool_name(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(ScanError::ExecutionTimeout {
                    tool: self.tool_name(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        interpret_output(&self.tool_name(), output.status.success(), &stdout, &stderr)
    }
}

/// Decide what a finished process produced.
///
/// Scanners often exit non-zero when they find issues while still printing a
/// valid report, so stdout is parsed regardless of exit status.
fn interpret_output(
    tool: &str,
    success: bool,
    stdout: &str,
    stderr: &str,
) -> Result<Value, ScanError> {
    let stdout = stdout.trim();
    if stdout.is_empty() {
        return Err(ScanError::ToolExecution {
            tool: tool.to_string(),
            message: format!("failed with no output: {}", stderr.trim()),
        });
    }

    match serde_json::from_str(stdout) {
        Ok(payload) => Ok(payload),
        Err(e) if success => Err(ScanError::MalformedOutput {
            tool: tool.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Err(ScanError::ToolExecution {
            tool: tool.to_string(),
            message: stderr.trim().to_string(),
        }),
    }
}
