pub mod acquisition;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod services;

use std::collections::HashMap;
use std::sync::Arc;

use errors::AppError;
use models::tool::ScannerTool;
use services::projects::ProjectRegistry;
use services::scan::ScanOrchestrator;
use services::storage::FileResultStore;

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::AppConfig>,
    pub orchestrators: Arc<HashMap<ScannerTool, ScanOrchestrator>>,
    pub results: FileResultStore,
}

impl AppState {
    /// Build one orchestrator per supported tool from the configuration.
    pub fn from_config(config: config::AppConfig) -> Self {
        let orchestrators = ScannerTool::ALL
            .into_iter()
            .map(|tool| (tool, ScanOrchestrator::from_config(tool, &config)))
            .collect();

        Self {
            results: FileResultStore::new(&config.results_dir),
            orchestrators: Arc::new(orchestrators),
            config: Arc::new(config),
        }
    }

    pub fn orchestrator(&self, tool: ScannerTool) -> Result<&ScanOrchestrator, AppError> {
        self.orchestrators
            .get(&tool)
            .ok_or_else(|| AppError::Internal(format!("No orchestrator configured for {tool}")))
    }

    pub fn registry(&self) -> ProjectRegistry {
        ProjectRegistry::new(&self.config.projects_dir, self.config.projects.clone())
    }
}
