//! Output formatting utilities for the CLI
//!
//! Renders orchestration results as a status line plus a step table, and
//! prints colored status messages.

use tabled::{
    settings::{Style, Width},
    Table, Tabled,
};

use tb_orchestrate::OrchestrationResult;

/// Width the step table wraps at
const TABLE_WIDTH: usize = 100;

/// Format an orchestration result for the terminal
///
/// The first line carries the status and, when present, the completion
/// reason in parentheses. Steps follow as a table with plan and behavior
/// columns.
pub fn format_result(result: &OrchestrationResult) -> String {
    let mut output = format!("Status: {}", result.status_label());
    if let Some(reason) = &result.completion_reason {
        output.push_str(&format!(" ({})", reason));
    }
    output.push('\n');

    if result.steps.is_empty() {
        output.push_str("No steps reported\n");
        return output;
    }

    #[derive(Tabled)]
    struct StepRow {
        #[tabled(rename = "STEP")]
        step: u64,
        #[tabled(rename = "PLAN")]
        plan: String,
        #[tabled(rename = "BEHAVIOR")]
        behavior: String,
    }

    let rows: Vec<StepRow> = result
        .numbered_steps()
        .map(|(step, s)| StepRow {
            step,
            plan: s.plan.clone().unwrap_or_else(|| "-".to_string()),
            behavior: s
                .behavior_fact_thoughts
                .as_deref()
                .map(|b| truncate(b, 200))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    output.push_str(
        &Table::new(rows)
            .with(Style::rounded())
            .with(Width::wrap(TABLE_WIDTH))
            .to_string(),
    );
    output.push('\n');
    output
}

/// Format the full response body as pretty JSON
pub fn format_raw(result: &OrchestrationResult) -> String {
    serde_json::to_string_pretty(&result.raw).unwrap_or_else(|_| result.raw.to_string())
}

/// Mask a secret for display
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        "(not set)".to_string()
    } else {
        "********".to_string()
    }
}

/// Truncate a string with ellipsis if too long
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Green),
        Print("✓ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an error message to stderr in red with an X prefix
pub fn print_error(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a warning message to stderr in yellow
pub fn print_warning(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Yellow),
        Print("⚠ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an informational message in cyan
pub fn print_info(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("ℹ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(raw: serde_json::Value) -> OrchestrationResult {
        OrchestrationResult::from_value(raw)
    }

    #[test]
    fn test_format_result_with_steps() {
        let out = format_result(&result(json!({
            "status": "success",
            "completion_reason": "DONE",
            "steps": [
                {"step_index": 1, "plan": "Open the browser", "behavior_fact_thoughts": "Browser opened"},
                {"plan": "Search"}
            ]
        })));

        assert!(out.starts_with("Status: success (DONE)\n"));
        assert!(out.contains("Open the browser"));
        assert!(out.contains("Browser opened"));
        assert!(out.contains("PLAN"));
    }

    #[test]
    fn test_format_result_without_steps() {
        let out = format_result(&result(json!({})));
        assert_eq!(out, "Status: unknown\nNo steps reported\n");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "(not set)");
        assert_eq!(mask_secret("hunter2"), "********");
    }
}
