//! Remote scanner API query with a pre-issued bearer token.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::acquisition::AcquisitionStrategy;
use crate::config::DeepSourceConfig;
use crate::errors::ScanError;
use crate::models::project::ScanTarget;
use crate::models::tool::ScannerTool;

/// POSTs a JSON query to a scanner API.
///
/// Without a token the strategy reports itself unavailable. Transport
/// failures, non-2xx responses and in-band `errors` are fatal to the whole
/// acquisition: the chain does not continue to stand-in data.
pub struct RemoteQueryStrategy {
    tool: ScannerTool,
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    body: Value,
    timeout: Duration,
}

impl RemoteQueryStrategy {
    pub fn new(
        tool: ScannerTool,
        endpoint: &str,
        token: Option<String>,
        body: Value,
        timeout: Duration,
    ) -> Self {
        Self {
            tool,
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            token,
            body,
            timeout,
        }
    }

    /// DeepSource GraphQL issues query for the configured repository.
    pub fn deepsource(config: &DeepSourceConfig, timeout: Duration) -> Self {
        Self::new(
            ScannerTool::DeepSource,
            &config.api_url,
            config.api_token.clone(),
            json!({ "query": deepsource_issues_query(config) }),
            timeout,
        )
    }

    fn tool_name(&self) -> String {
        self.tool.display_name().to_string()
    }
}

/// Repository issues, first page of 100.
pub fn deepsource_issues_query(config: &DeepSourceConfig) -> String {
    format!(
        r#"query {{
  repository(login: "{owner}", name: "{name}", vcsProvider: {provider}) {{
    name
    issues(first: 100) {{
      totalCount
      edges {{
        node {{
          issue {{
            shortcode
            title
            severity
            category
          }}
        }}
      }}
    }}
  }}
}}"#,
        owner = config.repo_owner,
        name = config.repo_name,
        provider = config.vcs_provider,
    )
}

#[async_trait]
impl AcquisitionStrategy for RemoteQueryStrategy {
    fn name(&self) -> &str {
        "remote-query"
    }

    async fn attempt(&self, target: &ScanTarget) -> Result<Value, ScanError> {
        let Some(token) = self.token.as_deref() else {
            return Err(ScanError::StrategyUnavailable {
                tool: self.tool_name(),
                strategy: self.name().to_string(),
                reason: "no API token configured".to_string(),
            });
        };

        tracing::debug!(
            tool = %self.tool,
            project = %target.name,
            endpoint = %self.endpoint,
            "Querying scanner API"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&self.body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ScanError::RemoteTransport {
                tool: self.tool_name(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ScanError::RemoteTransport {
            tool: self.tool_name(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(ScanError::RemoteError {
                tool: self.tool_name(),
                message: format!("{} - {text}", status.as_u16()),
            });
        }

        let payload: Value =
            serde_json::from_str(&text).map_err(|e| ScanError::MalformedOutput {
                tool: self.tool_name(),
                message: e.to_string(),
            })?;

        if let Some(errors) = payload.get("errors") {
            return Err(ScanError::RemoteError {
                tool: self.tool_name(),
                message: format!("GraphQL error: {errors}"),
            });
        }

        Ok(payload)
    }
}
