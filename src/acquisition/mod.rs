//! Raw scan acquisition through an ordered chain of strategies.
//!
//! Each tool gets a `StrategyChain`: local process invocation first, then a
//! remote query where the tool has one, then stand-in data when enabled. The
//! first strategy to return a payload wins. A strategy that fails with a
//! fall-through error (see [`ScanError::falls_through`]) hands over to the
//! next one; any other failure aborts the acquisition.

pub mod process;
pub mod remote;
pub mod stand_in;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::ScanError;
use crate::models::project::ScanTarget;
use crate::models::tool::ScannerTool;

use self::process::LocalProcessStrategy;
use self::remote::RemoteQueryStrategy;
use self::stand_in::StandInStrategy;

/// One way of obtaining a tool's raw output.
#[async_trait]
pub trait AcquisitionStrategy: Send + Sync {
    /// Short name used in logs and exhaustion errors.
    fn name(&self) -> &str;

    /// Try once to obtain a raw payload for `target`.
    async fn attempt(&self, target: &ScanTarget) -> Result<Value, ScanError>;
}

/// Anything that can produce a raw payload for a project.
#[async_trait]
pub trait ScanAcquirer: Send + Sync {
    async fn acquire(&self, target: &ScanTarget) -> Result<Value, ScanError>;
}

/// Ordered fallback over acquisition strategies for one tool.
pub struct StrategyChain {
    tool: ScannerTool,
    strategies: Vec<Box<dyn AcquisitionStrategy>>,
}

impl StrategyChain {
    pub fn new(tool: ScannerTool, strategies: Vec<Box<dyn AcquisitionStrategy>>) -> Self {
        Self { tool, strategies }
    }

    /// Build the configured chain for `tool`.
    pub fn for_tool(tool: ScannerTool, config: &AppConfig) -> Self {
        let timeout = config.scan_timeout();
        let mut strategies: Vec<Box<dyn AcquisitionStrategy>> = Vec::new();

        match tool {
            ScannerTool::Snyk => {
                strategies.push(Box::new(LocalProcessStrategy::snyk(&config.snyk, timeout)));
            }
            ScannerTool::DeepSource => {
                strategies.push(Box::new(LocalProcessStrategy::deepsource(
                    &config.deepsource,
                    timeout,
                )));
                strategies.push(Box::new(RemoteQueryStrategy::deepsource(
                    &config.deepsource,
                    timeout,
                )));
            }
        }

        if config.stand_in_enabled {
            strategies.push(Box::new(StandInStrategy::new(tool)));
        }

        Self::new(tool, strategies)
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

#[async_trait]
impl ScanAcquirer for StrategyChain {
    async fn acquire(&self, target: &ScanTarget) -> Result<Value, ScanError> {
        let mut attempted: Vec<&str> = Vec::new();

        for strategy in &self.strategies {
            attempted.push(strategy.name());
            match strategy.attempt(target).await {
                Ok(payload) => {
                    tracing::info!(
                        tool = %self.tool,
                        project = %target.name,
                        strategy = strategy.name(),
                        "Acquired scan payload"
                    );
                    return Ok(payload);
                }
                Err(e) if e.falls_through() => {
                    tracing::debug!(
                        tool = %self.tool,
                        project = %target.name,
                        strategy = strategy.name(),
                        error = %e,
                        "Strategy unavailable, trying next"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        tool = %self.tool,
                        project = %target.name,
                        strategy = strategy.name(),
                        error = %e,
                        "Acquisition aborted"
                    );
                    return Err(e);
                }
            }
        }

        Err(ScanError::AllStrategiesExhausted {
            tool: self.tool.display_name().to_string(),
            attempted: if attempted.is_empty() {
                "none".to_string()
            } else {
                attempted.join(", ")
            },
        })
    }
}
