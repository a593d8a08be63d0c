//! Task submission

use anyhow::Result;

use tb_orchestrate::Orchestrator;

use crate::output::{format_raw, format_result, print_info};

/// Submit `task` and print the result
pub async fn run_command<O: Orchestrator + ?Sized>(
    orchestrator: &O,
    task: &str,
    raw_json: bool,
) -> Result<()> {
    if task.trim().is_empty() {
        anyhow::bail!("Describe what you want the AI to do");
    }

    tracing::debug!("Submitting task ({} chars, json={})", task.len(), raw_json);
    if !raw_json {
        print_info("Running task...");
    }

    let result = orchestrator.run_task(task).await?;

    if raw_json {
        println!("{}", format_raw(&result));
    } else {
        print!("{}", format_result(&result));
    }

    Ok(())
}
