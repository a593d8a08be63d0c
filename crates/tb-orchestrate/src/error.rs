//! Orchestration client errors

use thiserror::Error;

/// Errors from talking to the orchestration service
#[derive(Error, Debug)]
pub enum OrchestrateError {
    /// A required setting is empty
    #[error("{0} is required")]
    MissingSetting(&'static str),

    /// The task text is empty
    #[error("Task is empty")]
    EmptyTask,

    /// The service could not be reached
    #[error("Cannot reach TakeBridge backend. Make sure the orchestrator is running. ({0})")]
    Unreachable(#[source] reqwest::Error),

    /// The orchestrator failed because its VM controller is not available
    #[error(
        "Controller service error. The orchestrator is trying to connect to a VM controller.\n\
         Start the controller service, or configure the orchestrator to work without one.\n\
         Details: {body}"
    )]
    ControllerUnavailable { body: String },

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was not what we expected
    #[error("Invalid response from orchestrator: {0}")]
    Decode(String),

    /// The workspace exists but has no desktop URL yet
    #[error("Workspace found, but vnc_url is null. Backend not wired yet.")]
    WorkspaceNotWired,

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl OrchestrateError {
    /// Map a non-success response to an error
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        if status == 500 && body.contains("Controller") {
            OrchestrateError::ControllerUnavailable { body }
        } else {
            OrchestrateError::Http { status, body }
        }
    }

    /// Map a transport-level failure to an error
    pub(crate) fn from_request(err: reqwest::Error) -> Self {
        if err.is_decode() {
            OrchestrateError::Decode(err.to_string())
        } else {
            OrchestrateError::Unreachable(err)
        }
    }

    /// HTTP status, if the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            OrchestrateError::Http { status, .. } => Some(*status),
            OrchestrateError::ControllerUnavailable { .. } => Some(500),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_error_detected() {
        let err = OrchestrateError::from_status(500, "Controller unreachable".into());
        assert!(matches!(err, OrchestrateError::ControllerUnavailable { .. }));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_plain_http_error() {
        let err = OrchestrateError::from_status(422, "bad task".into());
        assert_eq!(err.to_string(), "HTTP 422: bad task");
        assert_eq!(err.status(), Some(422));

        let err = OrchestrateError::from_status(500, "boom".into());
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
