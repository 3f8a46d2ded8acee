//! Human-readable terminal renderer.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;
use stanza_manifest::InstallManifest;

use crate::application::services::manifest_source::ManifestOrigin;
use crate::domain::config::{CONFIG_ENV, VALID_CONFIG_KEYS};
use crate::domain::{
    Attribute, CheckOutcome, CheckResult, ChecksFailed, VerificationReport, VerifyConfig,
};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render every check grouped into files and service, then the verdict.
    ///
    /// With `--quiet` only failed checks are printed, to stderr.
    pub fn render_report(&self, report: &VerificationReport, origin: &ManifestOrigin) {
        let summary = report.summary();

        if self.ctx.quiet {
            for failure in report.failures() {
                self.ctx.error(&failure.describe());
            }
            return;
        }

        println!();
        self.ctx.header("Stanza installation check");
        self.ctx.kv("Platform:", &report.platform.describe());
        self.ctx.kv("Manifest:", &origin.to_string());

        let (service, files): (Vec<&CheckResult>, Vec<&CheckResult>) =
            report.results.iter().partition(|r| is_service_attribute(r.attribute));
        for (title, group) in [("Files:", files), ("Service:", service)] {
            if group.is_empty() {
                continue;
            }
            println!();
            println!("  {}", title.style(self.ctx.styles.bold));
            for result in group {
                self.print_result(result);
            }
        }

        println!();
        if report.is_success() {
            let skipped = if summary.skipped > 0 {
                format!(" ({} skipped)", summary.skipped)
            } else {
                String::new()
            };
            self.ctx
                .success(&format!("All {} checks passed{skipped}", summary.passed));
        } else {
            let verdict = ChecksFailed::from(summary);
            println!("  {} {verdict}", "✗".style(self.ctx.styles.error));
        }
        println!();
    }

    fn print_result(&self, result: &CheckResult) {
        let line = result.describe();
        match result.outcome {
            CheckOutcome::Passed => {
                println!("    {} {line}", "✓".style(self.ctx.styles.success));
            }
            CheckOutcome::Failed { .. } => {
                println!("    {} {line}", "✗".style(self.ctx.styles.error));
            }
            CheckOutcome::Skipped { .. } => {
                println!(
                    "    {} {}",
                    "-".style(self.ctx.styles.dim),
                    line.style(self.ctx.styles.dim)
                );
            }
        }
    }

    /// Print the effective manifest as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn render_manifest(&self, manifest: &InstallManifest, origin: &ManifestOrigin) -> Result<()> {
        let yaml = serde_yaml::to_string(manifest).context("cannot serialize manifest")?;
        if !self.ctx.quiet {
            println!("# source: {origin}");
        }
        print!("{yaml}");
        Ok(())
    }

    /// Render the current verifier configuration.
    pub fn render_config(&self, config: &VerifyConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for key in VALID_CONFIG_KEYS {
            let value = config.get(key).unwrap_or_default();
            println!("  {:<22} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, "NO_COLOR", "RUST_LOG"] {
            println!(
                "    {:<22} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}

fn is_service_attribute(attribute: Attribute) -> bool {
    matches!(
        attribute,
        Attribute::Installed | Attribute::Enabled | Attribute::Running
    )
}
