//! TakeBridge CLI
//!
//! Single binary for the widget's non-visual operations:
//! - Submitting tasks to the orchestrator
//! - Looking up the workspace desktop URL
//! - Managing the settings file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use takebridge::commands;
use tb_core::config::{self, Settings};
use tb_orchestrate::OrchestratorClient;

#[derive(Parser)]
#[command(name = "takebridge")]
#[command(author, version, about = "Submit tasks to a TakeBridge orchestrator")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a task through the orchestrator
    Run {
        /// What the AI should do
        #[arg(required = true, num_args = 1..)]
        task: Vec<String>,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,

        /// Allow code execution steps (overrides config)
        #[arg(long)]
        code_execution: bool,
    },

    /// Show the remote desktop URL of your workspace
    Workspace {
        /// Store the URL as desktop.url in the config file
        #[arg(long)]
        save: bool,
    },

    /// Show the configured remote desktop
    Desktop,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Dotted key, e.g. orchestrator.base_url
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Dotted key, e.g. desktop.url
        key: String,
        /// New value
        value: String,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    tracing::debug!("Using config file {:?}", config_path);

    match cli.command {
        Commands::Run {
            task,
            json,
            code_execution,
        } => {
            let settings = Settings::load_or_default(&config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))?;
            let mut client = OrchestratorClient::from_settings(&settings.orchestrator)?;
            if code_execution {
                client = client.with_code_execution(true);
            }
            commands::run_command(&client, &task.join(" "), json).await?;
        }

        Commands::Workspace { save } => {
            let mut settings = Settings::load_or_default(&config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))?;
            let client = OrchestratorClient::from_settings(&settings.orchestrator)?;
            commands::workspace_command(&client, &mut settings, &config_path, save).await?;
        }

        Commands::Desktop => {
            let settings = Settings::load_or_default(&config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))?;
            commands::desktop_command(&settings.desktop)?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_show(&config_path)?,
            ConfigAction::Get { key } => commands::config_get(&config_path, &key)?,
            ConfigAction::Set { key, value } => {
                commands::config_set(&config_path, &key, &value)?
            }
            ConfigAction::Init { force } => commands::config_init(&config_path, force)?,
            ConfigAction::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}
