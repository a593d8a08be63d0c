//! Request and response bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /orchestrate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestrateRequest {
    pub task: String,
    pub enable_code_execution: bool,
}

/// One step of an orchestration run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    #[serde(default)]
    pub step_index: Option<u64>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub behavior_fact_thoughts: Option<String>,
}

impl StepSummary {
    fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(fields) => Self {
                step_index: fields.get("step_index").and_then(serde_json::Value::as_u64),
                plan: fields.get("plan").and_then(text),
                behavior_fact_thoughts: fields.get("behavior_fact_thoughts").and_then(text),
            },
            other => Self {
                plan: text(other),
                ..Default::default()
            },
        }
    }
}

/// Display text for a JSON value. Strings are taken as-is, `null` is absent.
fn text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Result of `POST /orchestrate`
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestrationResult {
    pub status: Option<String>,
    pub completion_reason: Option<String>,
    pub steps: Vec<StepSummary>,
    /// The full response body
    pub raw: serde_json::Value,
}

impl OrchestrationResult {
    /// Extract the known fields, keeping the full body alongside.
    ///
    /// Decoding never fails: a `steps` value that is not an array is
    /// ignored, and non-string fields are rendered as JSON text.
    pub fn from_value(raw: serde_json::Value) -> Self {
        let steps = match raw.get("steps") {
            Some(serde_json::Value::Array(items)) => {
                items.iter().map(StepSummary::from_value).collect()
            }
            Some(other) if !other.is_null() => {
                tracing::debug!("Ignoring non-array steps in orchestration result");
                Vec::new()
            }
            _ => Vec::new(),
        };

        Self {
            status: raw.get("status").and_then(text),
            completion_reason: raw.get("completion_reason").and_then(text),
            steps,
            raw,
        }
    }

    /// Status for display
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }

    /// Steps paired with their display number. Missing indices fall back to position + 1.
    pub fn numbered_steps(&self) -> impl Iterator<Item = (u64, &StepSummary)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step.step_index.unwrap_or(i as u64 + 1), step))
    }
}

/// Body of `GET /app/workspace`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkspaceInfo {
    #[serde(default)]
    pub vnc_url: Option<String>,
}
