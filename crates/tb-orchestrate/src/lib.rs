//! tb-orchestrate: Client for the TakeBridge orchestration service
//!
//! Submits natural-language tasks and looks up the workspace's remote
//! desktop URL. The client is constructed explicitly from settings and
//! owned by whoever needs it.

mod client;
mod error;
mod types;

pub use client::{Orchestrator, OrchestratorClient};
pub use error::OrchestrateError;
pub use types::{OrchestrateRequest, OrchestrationResult, StepSummary, WorkspaceInfo};
