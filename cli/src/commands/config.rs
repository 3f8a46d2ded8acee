//! `stanza-verify config`: show configuration values.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

use clap::Subcommand;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Print one configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the key is unknown.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => {
            let config = config_service::load_config(&app.config_store)?;
            let path = app.config_store.path()?;
            app.renderer().render_config(&config, &path)?;
        }
        ConfigCommand::Path => {
            app.renderer().render_config_path(&app.config_store.path()?)?;
        }
        ConfigCommand::Get { key } => {
            let config = config_service::load_config(&app.config_store)?;
            let value = config.get(&key)?;
            app.renderer().render_config_value(&key, &value)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
