//! Application context: unified state passed to every command handler.
//!
//! `AppContext` bundles the output context, rendering mode and the stores
//! every command needs, so command signatures stay stable as flags grow.

use std::time::Duration;

use stanza_manifest::PlatformFamily;

use crate::domain::VerifyConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::manifest::FileManifestStore;
use crate::infra::service::{PlatformServiceManager, service_manager_for};
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags passed from the top-level CLI.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Verifier configuration file.
    pub config_store: YamlConfigStore,
    /// Manifest files on disk.
    pub manifest_store: FileManifestStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// JSON mode implies quiet terminal output so stdout carries only the
    /// JSON document.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store: YamlConfigStore,
            manifest_store: FileManifestStore,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Service manager for the target `family`, with the configured command
    /// timeout.
    #[must_use]
    pub fn service_manager(
        &self,
        config: &VerifyConfig,
        family: PlatformFamily,
    ) -> PlatformServiceManager<TokioCommandRunner> {
        let runner = TokioCommandRunner::new(Duration::from_secs(config.command_timeout_secs));
        service_manager_for(family, runner)
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }
}
