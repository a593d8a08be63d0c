//! CLI command implementations

mod config;
mod desktop;
mod run;
mod workspace;

pub use config::{config_get, config_init, config_set, config_show};
pub use desktop::{desktop_command, format_desktop};
pub use run::run_command;
pub use workspace::workspace_command;
