//! Scan pipeline orchestrating validation, acquisition, storage and metrics.
//!
//! `scan_project` resolves the project, acquires a raw payload through the
//! tool's strategy chain, stores it, and normalizes it into a `MetricResult`.
//! Every error is converted into a failed `ScanOutcome` here; nothing
//! propagates to callers. `scan_all` repeats this sequentially for every
//! registered project.

use std::sync::Arc;

use serde_json::Value;

use crate::acquisition::{ScanAcquirer, StrategyChain};
use crate::config::AppConfig;
use crate::errors::ScanError;
use crate::metrics::{calculator_for, MetricCalculator};
use crate::models::metric::MetricResult;
use crate::models::outcome::{BatchReport, ScanOutcome};
use crate::models::tool::ScannerTool;
use crate::services::projects::ProjectRegistry;
use crate::services::storage::{FileResultStore, ResultStore};

/// Drives one tool across the project registry.
pub struct ScanOrchestrator {
    tool: ScannerTool,
    registry: ProjectRegistry,
    acquirer: Arc<dyn ScanAcquirer>,
    store: Arc<dyn ResultStore>,
    calculator: Box<dyn MetricCalculator>,
}

impl ScanOrchestrator {
    pub fn new(
        tool: ScannerTool,
        registry: ProjectRegistry,
        acquirer: Arc<dyn ScanAcquirer>,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            tool,
            registry,
            acquirer,
            store,
            calculator: calculator_for(tool),
        }
    }

    /// Wire the configured strategy chain, file store and registry for `tool`.
    pub fn from_config(tool: ScannerTool, config: &AppConfig) -> Self {
        Self::new(
            tool,
            ProjectRegistry::new(&config.projects_dir, config.projects.clone()),
            Arc::new(StrategyChain::for_tool(tool, config)),
            Arc::new(FileResultStore::new(&config.results_dir)),
        )
    }

    pub fn tool(&self) -> ScannerTool {
        self.tool
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    /// Scan one project. Never fails; errors become a failed outcome.
    pub async fn scan_project(&self, project: &str) -> ScanOutcome {
        match self.run(project).await {
            Ok((location, metrics)) => {
                tracing::info!(
                    tool = %self.tool,
                    project = %project,
                    total_issues = metrics.total_issues,
                    "Scan completed"
                );
                ScanOutcome::succeeded(project, location, metrics)
            }
            Err(e) => {
                tracing::warn!(tool = %self.tool, project = %project, error = %e, "Scan failed");
                ScanOutcome::failed(project, e.to_string())
            }
        }
    }

    /// Scan every registered project in order, without stopping on failures.
    pub async fn scan_all(&self) -> BatchReport {
        let mut results = Vec::with_capacity(self.registry.names().len());
        for project in self.registry.names() {
            results.push(self.scan_project(project).await);
        }
        let report = BatchReport::new(results);
        tracing::info!(tool = %self.tool, message = %report.message, "Batch scan finished");
        report
    }

    async fn run(&self, project: &str) -> Result<(String, MetricResult), ScanError> {
        let target = self.registry.resolve(project)?;
        let payload: Value = self.acquirer.acquire(&target).await?;
        let location = self.store.save(&payload, self.tool.slug(), project).await?;
        let metrics = self.calculator.calculate(&payload);
        Ok((location, metrics))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::models::project::ScanTarget;

    /// Returns a fixed payload, failing for the listed projects.
    struct FakeAcquirer {
        payload: Value,
        failing: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl FakeAcquirer {
        fn new(payload: Value, failing: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                payload,
                failing,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ScanAcquirer for FakeAcquirer {
        async fn acquire(&self, target: &ScanTarget) -> Result<Value, ScanError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.iter().any(|name| *name == target.name) {
                return Err(ScanError::ExecutionTimeout {
                    tool: "DeepSource".to_string(),
                    secs: 300,
                });
            }
            Ok(self.payload.clone())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ResultStore for MemoryStore {
        async fn save(
            &self,
            _payload: &Value,
            tool: &str,
            project: &str,
        ) -> Result<String, ScanError> {
            let location = format!("memory://{tool}_{project}.json");
            self.saved
                .lock()
                .unwrap()
                .push((tool.to_string(), project.to_string()));
            Ok(location)
        }
    }

    fn projects_root(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        dir
    }

    fn orchestrator(
        root: &Path,
        acquirer: Arc<FakeAcquirer>,
        store: Arc<MemoryStore>,
    ) -> ScanOrchestrator {
        ScanOrchestrator::new(
            ScannerTool::DeepSource,
            ProjectRegistry::new(
                root,
                vec!["flask_demo".to_string(), "nodejs-goof".to_string()],
            ),
            acquirer,
            store,
        )
    }

    fn graphql_payload() -> Value {
        json!({"data": {"repository": {"issues": {"edges": [
            {"node": {"issue": {"severity": "CRITICAL"}}},
            {"node": {"issue": {"severity": "MINOR"}}}
        ]}}}})
    }

    #[tokio::test]
    async fn successful_scan_stores_and_normalizes() {
        let root = projects_root(&["flask_demo", "nodejs-goof"]);
        let acquirer = FakeAcquirer::new(graphql_payload(), vec![]);
        let store = Arc::new(MemoryStore::default());
        let orch = orchestrator(root.path(), acquirer.clone(), store.clone());

        let outcome = orch.scan_project("flask_demo").await;

        assert!(outcome.success);
        assert_eq!(outcome.project, "flask_demo");
        assert_eq!(
            outcome.file_path.as_deref(),
            Some("memory://deepsource_flask_demo.json")
        );
        let metrics = outcome.metric_result.unwrap();
        assert_eq!(metrics.tool_name, "DeepSource");
        assert_eq!(metrics.critical, 1);
        assert_eq!(metrics.medium, 1);
        assert_eq!(metrics.total_issues, 2);
        assert_eq!(
            store.saved.lock().unwrap().as_slice(),
            &[("deepsource".to_string(), "flask_demo".to_string())]
        );
    }

    #[tokio::test]
    async fn unregistered_project_never_reaches_acquisition() {
        let root = projects_root(&["flask_demo", "intruder"]);
        let acquirer = FakeAcquirer::new(graphql_payload(), vec![]);
        let store = Arc::new(MemoryStore::default());
        let orch = orchestrator(root.path(), acquirer.clone(), store.clone());

        let outcome = orch.scan_project("intruder").await;

        assert!(!outcome.success);
        assert_eq!(outcome.project, "intruder");
        assert!(outcome.error.unwrap().contains("not a registered project"));
        assert!(outcome.metric_result.is_none());
        assert_eq!(acquirer.calls.load(Ordering::SeqCst), 0);
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_project_directory_fails_before_acquisition() {
        let root = projects_root(&["flask_demo"]);
        let acquirer = FakeAcquirer::new(graphql_payload(), vec![]);
        let orch = orchestrator(root.path(), acquirer.clone(), Arc::new(MemoryStore::default()));

        let outcome = orch.scan_project("nodejs-goof").await;

        assert!(!outcome.success);
        assert_eq!(acquirer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn acquisition_error_becomes_failed_outcome_without_storing() {
        let root = projects_root(&["flask_demo", "nodejs-goof"]);
        let acquirer = FakeAcquirer::new(graphql_payload(), vec!["flask_demo"]);
        let store = Arc::new(MemoryStore::default());
        let orch = orchestrator(root.path(), acquirer, store.clone());

        let outcome = orch.scan_project("flask_demo").await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("DeepSource scan timeout (exceeded 300 seconds)")
        );
        assert!(outcome.file_path.is_none());
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn scan_all_continues_past_failures() {
        let root = projects_root(&["flask_demo", "nodejs-goof"]);
        let acquirer = FakeAcquirer::new(graphql_payload(), vec!["flask_demo"]);
        let orch = orchestrator(root.path(), acquirer.clone(), Arc::new(MemoryStore::default()));

        let report = orch.scan_all().await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].project, "flask_demo");
        assert!(!report.results[0].success);
        assert_eq!(report.results[1].project, "nodejs-goof");
        assert!(report.results[1].success);
        assert!(report.is_success());
        assert_eq!(report.message, "Scanned 1/2 projects");
        assert_eq!(acquirer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn scan_all_fails_when_every_project_fails() {
        let root = projects_root(&["flask_demo", "nodejs-goof"]);
        let acquirer = FakeAcquirer::new(json!({}), vec!["flask_demo", "nodejs-goof"]);
        let orch = orchestrator(root.path(), acquirer, Arc::new(MemoryStore::default()));

        let report = orch.scan_all().await;

        assert_eq!(report.total, 2);
        assert_eq!(report.succeeded, 0);
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn from_config_runs_stand_in_end_to_end() {
        let root = projects_root(&["flask_demo"]);
        let results = tempfile::tempdir().unwrap();
        let projects_dir = root.path().display().to_string();
        let results_dir = results.path().display().to_string();
        let config = AppConfig::from_vars(|key| match key {
            "PROJECTS_DIR" => Some(projects_dir.clone()),
            "RESULTS_DIR" => Some(results_dir.clone()),
            "SCAN_PROJECTS" => Some("flask_demo".to_string()),
            "SNYK_CLI_PATH" => Some("/nonexistent/snyk-cli-for-tests".to_string()),
            _ => None,
        });
        let orch = ScanOrchestrator::from_config(ScannerTool::Snyk, &config);

        let outcome = orch.scan_project("flask_demo").await;

        assert!(outcome.success, "{:?}", outcome.error);
        let location = outcome.file_path.unwrap();
        assert!(Path::new(&location).exists());
        assert!(location.contains("snyk_code_flask_demo_"));
        let metrics = outcome.metric_result.unwrap();
        assert_eq!(metrics.tool_name, "Snyk Code");
        assert_eq!(metrics.total_issues, 2);
    }
}
