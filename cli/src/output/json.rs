//! JSON output.
//!
//! Every `--json` code path prints exactly one pretty-printed JSON document on
//! stdout. Failures use the error object produced by [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use stanza_manifest::InstallManifest;

use crate::application::services::manifest_source::ManifestOrigin;
use crate::domain::{CheckResult, Platform, Summary, VerificationReport, VerifyConfig};

/// Machine-readable renderer for `--json`.
pub struct JsonRenderer;

/// Top-level shape of `verify --json`.
#[derive(Serialize)]
struct ReportDocument<'a> {
    status: &'static str,
    platform: &'a Platform,
    manifest: String,
    summary: Summary,
    results: &'a [CheckResult],
    generated_at: String,
}

fn print_pretty(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

impl JsonRenderer {
    /// Render a verification report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_report(&self, report: &VerificationReport, origin: &ManifestOrigin) -> Result<()> {
        print_pretty(&report_document(report, origin))
    }

    /// Render the effective manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_manifest(&self, manifest: &InstallManifest, origin: &ManifestOrigin) -> Result<()> {
        print_pretty(&serde_json::json!({
            "source": origin.to_string(),
            "manifest": manifest,
        }))
    }

    /// Render the effective configuration and its location.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &VerifyConfig, path: &Path) -> Result<()> {
        print_pretty(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// Render one configuration value.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_value(&self, key: &str, value: &str) -> Result<()> {
        print_pretty(&serde_json::json!({ "key": key, "value": value }))
    }

    /// Render the configuration file location.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_path(&self, path: &Path) -> Result<()> {
        print_pretty(&serde_json::json!({ "path": path.display().to_string() }))
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_pretty(&serde_json::json!({ "version": version }))
    }
}

fn report_document<'a>(
    report: &'a VerificationReport,
    origin: &ManifestOrigin,
) -> ReportDocument<'a> {
    ReportDocument {
        status: if report.is_success() { "passed" } else { "failed" },
        platform: &report.platform,
        manifest: origin.to_string(),
        summary: report.summary(),
        results: &report.results,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
