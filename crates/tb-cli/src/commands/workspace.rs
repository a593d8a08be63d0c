//! Workspace lookup

use std::path::Path;

use anyhow::{Context, Result};

use tb_core::config::{save_config, Settings};
use tb_orchestrate::Orchestrator;

use crate::output::print_success;

/// Look up the workspace's remote desktop URL, optionally saving it
pub async fn workspace_command<O: Orchestrator + ?Sized>(
    orchestrator: &O,
    settings: &mut Settings,
    config_path: &Path,
    save: bool,
) -> Result<()> {
    let url = orchestrator.load_workspace().await?;

    tracing::debug!("Workspace desktop URL: {}", url);
    println!("{}", url);

    if save {
        settings.desktop.url = url;
        save_config(config_path, settings)
            .with_context(|| format!("Failed to save config to {:?}", config_path))?;
        print_success(&format!("Saved desktop URL to {:?}", config_path));
    }

    Ok(())
}
