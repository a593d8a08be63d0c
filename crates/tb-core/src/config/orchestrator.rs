//! Orchestration service settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::serde_utils::duration_secs;

/// Where and as whom tasks are submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSettings {
    /// Base URL of the orchestration service
    pub base_url: String,

    /// Sent as the `X-User-Id` header
    pub user_id: String,

    /// Ask the orchestrator to allow code execution steps
    pub enable_code_execution: bool,

    /// Accept self-signed certificates on https base URLs
    pub accept_invalid_certs: bool,

    /// Request timeout. Tasks can run for minutes.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000".to_string(),
            user_id: "local-dev-user".to_string(),
            enable_code_execution: false,
            accept_invalid_certs: true,
            timeout: Duration::from_secs(300),
        }
    }
}

impl OrchestratorSettings {
    /// Base URL without trailing slashes
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Whether the base URL uses TLS
    pub fn is_https(&self) -> bool {
        self.trimmed_base_url().starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_base_url() {
        let settings = OrchestratorSettings {
            base_url: "https://orch.local:9000///".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.trimmed_base_url(), "https://orch.local:9000");
        assert!(settings.is_https());
        assert!(!OrchestratorSettings::default().is_https());
    }
}
