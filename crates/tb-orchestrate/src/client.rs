//! HTTP client for the orchestration service

use async_trait::async_trait;
use reqwest::Client;

use tb_core::config::OrchestratorSettings;

use crate::error::OrchestrateError;
use crate::types::{OrchestrateRequest, OrchestrationResult, WorkspaceInfo};

/// Operations the widget needs from the orchestration service
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Submit a task and wait for the structured result
    async fn run_task(&self, task: &str) -> Result<OrchestrationResult, OrchestrateError>;

    /// Look up the remote desktop URL of the user's workspace
    async fn load_workspace(&self) -> Result<String, OrchestrateError>;
}

/// reqwest-backed [`Orchestrator`]
#[derive(Debug, Clone)]
pub struct OrchestratorClient {
    /// Base URL without trailing slashes
    base_url: String,
    /// Sent as `X-User-Id`
    user_id: String,
    /// Value of `enable_code_execution` in task requests
    enable_code_execution: bool,
    http: Client,
}

impl OrchestratorClient {
    /// Build a client from settings
    pub fn from_settings(settings: &OrchestratorSettings) -> Result<Self, OrchestrateError> {
        let base_url = settings.trimmed_base_url().to_string();
        if base_url.is_empty() {
            return Err(OrchestrateError::MissingSetting("Orchestrator URL"));
        }
        let user_id = settings.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(OrchestrateError::MissingSetting("User ID"));
        }

        let mut builder = Client::builder().timeout(settings.timeout);
        if settings.is_https() && settings.accept_invalid_certs {
            tracing::debug!("Accepting self-signed certificates for {}", base_url);
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build().map_err(OrchestrateError::Client)?;

        Ok(Self {
            base_url,
            user_id,
            enable_code_execution: settings.enable_code_execution,
            http,
        })
    }

    /// Override code execution for this client
    pub fn with_code_execution(mut self, enabled: bool) -> Self {
        self.enable_code_execution = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    async fn error_from_response(response: reqwest::Response) -> OrchestrateError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Orchestrator error: HTTP {}: {}", status, body);
        OrchestrateError::from_status(status, body)
    }
}

#[async_trait]
impl Orchestrator for OrchestratorClient {
    async fn run_task(&self, task: &str) -> Result<OrchestrationResult, OrchestrateError> {
        let task = task.trim();
        if task.is_empty() {
            return Err(OrchestrateError::EmptyTask);
        }

        let body = OrchestrateRequest {
            task: task.to_string(),
            enable_code_execution: self.enable_code_execution,
        };
        let url = format!("{}/orchestrate", self.base_url);
        tracing::info!("Submitting task to {} as {}", url, self.user_id);

        let response = self
            .http
            .post(&url)
            .header("X-User-Id", &self.user_id)
            .json(&body)
            .send()
            .await
            .map_err(OrchestrateError::from_request)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(OrchestrateError::from_request)?;
        let result = OrchestrationResult::from_value(raw);

        tracing::info!(
            "Task finished with status {} ({} steps)",
            result.status_label(),
            result.steps.len()
        );
        Ok(result)
    }

    async fn load_workspace(&self) -> Result<String, OrchestrateError> {
        let url = format!("{}/app/workspace", self.base_url);
        tracing::debug!("Loading workspace for {} from {}", self.user_id, url);

        let response = self
            .http
            .get(&url)
            .query(&[("user_id", self.user_id.as_str())])
            .send()
            .await
            .map_err(OrchestrateError::from_request)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let info: WorkspaceInfo = response
            .json()
            .await
            .map_err(OrchestrateError::from_request)?;

        match info.vnc_url {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(OrchestrateError::WorkspaceNotWired),
        }
    }
}
