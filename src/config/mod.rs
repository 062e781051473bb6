use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub projects_dir: PathBuf,
    pub projects: Vec<String>,
    pub results_dir: PathBuf,
    pub scan_timeout_secs: u64,
    pub stand_in_enabled: bool,
    pub snyk: SnykConfig,
    pub deepsource: DeepSourceConfig,
}

/// Snyk Code CLI settings.
#[derive(Debug, Clone)]
pub struct SnykConfig {
    pub cli_path: String,
}

/// DeepSource CLI and GraphQL API settings.
#[derive(Debug, Clone)]
pub struct DeepSourceConfig {
    pub cli_path: String,
    pub api_url: String,
    /// Pre-issued API token. `None` disables the remote strategy.
    pub api_token: Option<String>,
    pub repo_owner: String,
    pub repo_name: String,
    pub vcs_provider: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            host: var("BACKEND_HOST", "0.0.0.0"),
            port: var("BACKEND_PORT", "5001").parse().unwrap_or(5001),
            projects_dir: PathBuf::from(var("PROJECTS_DIR", "../test_projects")),
            projects: var("SCAN_PROJECTS", "flask_demo,nodejs-goof")
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            results_dir: PathBuf::from(var("RESULTS_DIR", "../results")),
            // Zero counts as unset.
            scan_timeout_secs: var("SCAN_TIMEOUT_SECS", "300")
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .unwrap_or(300),
            stand_in_enabled: parse_bool(&var("SCAN_STAND_IN_ENABLED", "true")).unwrap_or(true),
            snyk: SnykConfig {
                cli_path: var("SNYK_CLI_PATH", "snyk"),
            },
            deepsource: DeepSourceConfig {
                cli_path: var("DEEPSOURCE_CLI_PATH", "deepsource"),
                api_url: var("DEEPSOURCE_API_URL", "https://api.deepsource.io/graphql/"),
                api_token: lookup("DEEPSOURCE_API_TOKEN").filter(|t| !t.trim().is_empty()),
                repo_owner: var("DEEPSOURCE_REPO_OWNER", "elif1624"),
                repo_name: var("DEEPSOURCE_REPO_NAME", "kalite"),
                vcs_provider: var("DEEPSOURCE_VCS_PROVIDER", "GITHUB"),
            },
        }
    }

    /// Host and port to bind; the host may be a name such as `localhost`.
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    /// Per-strategy timeout for external calls.
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
