//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use stanza_manifest::InstallManifest;

use crate::domain::{FileProbe, Platform, ServiceFacts, VerifyConfig};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Inspection Ports ──────────────────────────────────────────────────────────

/// Read-only filesystem metadata lookup.
///
/// Never follows a final symlink, so a link is reported as `symlink`.
pub trait FileInspector {
    /// Inspect `path`. Absence and I/O failures are encoded in the probe, not
    /// returned as errors.
    fn inspect(&self, path: &Path) -> FileProbe;
}

/// Read-only service manager query.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Query installed/enabled/running state for `name`.
    ///
    /// A service that does not exist is `Ok` with `installed == false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service manager itself cannot be queried.
    async fn query(&self, name: &str) -> Result<ServiceFacts>;
}

/// Host operating-system detection.
pub trait PlatformProbe {
    /// Detect family, distribution and release.
    ///
    /// # Errors
    ///
    /// Returns an error if the host OS is not supported.
    fn detect(&self) -> Result<Platform>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading the verifier configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<VerifyConfig>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if no location can be determined.
    fn path(&self) -> Result<PathBuf>;
}

/// Abstracts reading a manifest file from disk.
pub trait ManifestStore {
    /// Load and validate the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    fn load(&self, path: &Path) -> Result<InstallManifest>;
}
