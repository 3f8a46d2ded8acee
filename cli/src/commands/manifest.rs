//! `stanza-verify manifest`: inspect the expectations a run would use.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use stanza_manifest::PlatformFamily;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::manifest_source::resolve_manifest;

/// Manifest subcommands.
#[derive(Subcommand)]
pub enum ManifestCommand {
    /// Print the effective manifest
    Show {
        /// Manifest file to load instead of the configured or built-in one
        #[arg(long, value_name = "PATH")]
        manifest: Option<PathBuf>,

        /// Platform family (defaults to the host)
        #[arg(long, value_enum)]
        platform: Option<PlatformFamily>,

        /// Install root for the built-in manifest
        #[arg(long, value_name = "DIR")]
        root: Option<String>,
    },
}

/// Run the manifest command.
///
/// # Errors
///
/// Returns an error if the configuration or manifest cannot be loaded.
pub fn run(app: &AppContext, cmd: ManifestCommand) -> Result<ExitCode> {
    match cmd {
        ManifestCommand::Show {
            manifest,
            platform,
            root,
        } => {
            let config = config_service::load_config(&app.config_store)?;
            let family = platform.unwrap_or_else(PlatformFamily::host);
            let resolved = resolve_manifest(
                &app.manifest_store,
                &config,
                family,
                manifest.as_deref(),
                root.as_deref(),
            )?;
            app.renderer()
                .render_manifest(&resolved.manifest, &resolved.origin)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
