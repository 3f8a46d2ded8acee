//! `stanza-verify verify`: check the installation against its manifest.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, ValueEnum};
use stanza_manifest::PlatformFamily;

use crate::app::AppContext;
use crate::application::ports::PlatformProbe;
use crate::application::services::config_service;
use crate::application::services::manifest_source::resolve_manifest;
use crate::application::services::verify_install::{VerifyScope, run_verification};
use crate::infra::fs::LocalFileInspector;
use crate::infra::platform::HostPlatformProbe;
use crate::output::TerminalReporter;

/// Which checks to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Only {
    /// Files and service
    #[default]
    All,
    /// Installed paths only
    Files,
    /// Service state only
    Service,
}

impl From<Only> for VerifyScope {
    fn from(only: Only) -> Self {
        match only {
            Only::All => Self::All,
            Only::Files => Self::Files,
            Only::Service => Self::Service,
        }
    }
}

/// Arguments for the verify command.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Manifest file (YAML, or JSON by extension) replacing the built-in expectations
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Platform family to verify as (defaults to the host)
    #[arg(long, value_enum)]
    pub platform: Option<PlatformFamily>,

    /// OS release to assume instead of the detected one, e.g. 6.10
    #[arg(long, value_name = "X.Y")]
    pub release: Option<String>,

    /// Install root for the built-in manifest
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Limit the run to one group of checks
    #[arg(long, value_enum, default_value_t = Only::All)]
    pub only: Only,
}

/// Run the verify command. Exits with failure when any check failed.
///
/// # Errors
///
/// Returns an error if configuration, platform detection or the manifest
/// cannot be resolved.
pub async fn run(app: &AppContext, args: VerifyArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let platform = HostPlatformProbe::new()
        .detect()?
        .with_overrides(args.platform, args.release.as_deref())?;
    let resolved = resolve_manifest(
        &app.manifest_store,
        &config,
        platform.family,
        args.manifest.as_deref(),
        args.root.as_deref(),
    )?;

    let services = app.service_manager(&config, platform.family);
    let files = LocalFileInspector::new();

    let report = {
        let reporter = TerminalReporter::new(&app.output);
        run_verification(
            &resolved.manifest,
            &platform,
            &files,
            &services,
            &reporter,
            args.only.into(),
        )
        .await?
    };

    app.renderer().render_report(&report, &resolved.origin)?;

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
