//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use stanza_manifest::PlatformFamily;
use thiserror::Error;

use crate::domain::check::Summary;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to the verifier's own configuration file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("command_timeout_secs must be at least 1")]
    ZeroTimeout,

    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },
}

// ── Platform errors ───────────────────────────────────────────────────────────

/// Errors related to platform detection and manifest/platform agreement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("unsupported operating system: {0}")]
    Unsupported(String),

    #[error("invalid release '{0}': expected a version such as 6.10")]
    InvalidRelease(String),

    #[error("manifest targets {manifest} but this host is {host}")]
    ManifestMismatch {
        manifest: PlatformFamily,
        host: PlatformFamily,
    },
}

// ── Verification outcome ──────────────────────────────────────────────────────

/// Verdict of a run with at least one failed assertion.
///
/// Used as the closing progress line and the last line of the human report.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{failed} of {total} checks failed")]
pub struct ChecksFailed {
    pub failed: usize,
    pub total: usize,
}

impl From<Summary> for ChecksFailed {
    fn from(summary: Summary) -> Self {
        Self {
            failed: summary.failed,
            total: summary.total,
        }
    }
}
