//! Application service: verify an installed package against its manifest.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::Result;
use stanza_manifest::InstallManifest;

use crate::application::ports::{FileInspector, ProgressReporter, ServiceManager};
use crate::domain::check::{
    CheckResult, ServiceProbe, VerificationReport, evaluate_file, evaluate_service, skip_file,
};
use crate::domain::error::{ChecksFailed, PlatformError};
use crate::domain::platform::Platform;

/// Which groups of checks a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyScope {
    #[default]
    All,
    Files,
    Service,
}

impl VerifyScope {
    fn includes_files(self) -> bool {
        matches!(self, Self::All | Self::Files)
    }

    fn includes_service(self) -> bool {
        matches!(self, Self::All | Self::Service)
    }
}

/// Run every check in `manifest` against the host.
///
/// The service query and the file batch run concurrently; results are
/// returned in manifest order (files first, then the service).
///
/// # Errors
///
/// Returns an error if `manifest` targets a different platform family.
pub async fn run_verification(
    manifest: &InstallManifest,
    platform: &Platform,
    files: &impl FileInspector,
    services: &impl ServiceManager,
    reporter: &impl ProgressReporter,
    scope: VerifyScope,
) -> Result<VerificationReport> {
    if manifest.platform != platform.family {
        return Err(PlatformError::ManifestMismatch {
            manifest: manifest.platform,
            host: platform.family,
        }
        .into());
    }

    // Service first: its first poll spawns the query process, which then
    // runs while the file batch is inspected.
    let (service_results, file_results) = tokio::join!(
        async {
            if scope.includes_service() {
                check_service(manifest, platform, services, reporter).await
            } else {
                Vec::new()
            }
        },
        async {
            if scope.includes_files() {
                check_files(manifest, platform, files, reporter)
            } else {
                Vec::new()
            }
        },
    );

    let mut results = file_results;
    results.extend(service_results);
    let report = VerificationReport {
        platform: platform.clone(),
        results,
    };

    let summary = report.summary();
    if report.is_success() {
        reporter.success(&format!("{} checks passed", summary.passed));
    } else {
        reporter.warn(&ChecksFailed::from(summary).to_string());
    }
    Ok(report)
}

fn check_files(
    manifest: &InstallManifest,
    platform: &Platform,
    files: &impl FileInspector,
    reporter: &impl ProgressReporter,
) -> Vec<CheckResult> {
    reporter.step(&format!("checking {} paths...", manifest.files.len()));
    let policy = platform.attribute_policy();
    manifest
        .files
        .iter()
        .flat_map(|expect| {
            if platform.file_checks_skipped(expect) {
                tracing::debug!(path = %expect.path, release = ?platform.release, "path not expected on this release");
                return skip_file(expect, policy, &platform.skip_reason());
            }
            let probe = files.inspect(Path::new(&expect.path));
            tracing::debug!(path = %expect.path, ?probe, "inspected");
            evaluate_file(expect, &probe, policy)
        })
        .collect()
}

async fn check_service(
    manifest: &InstallManifest,
    platform: &Platform,
    services: &impl ServiceManager,
    reporter: &impl ProgressReporter,
) -> Vec<CheckResult> {
    let Some(expect) = &manifest.service else {
        return Vec::new();
    };

    // Skipped releases may not have the service manager at all; don't query it.
    let probe = if platform.service_checks_skipped(expect) {
        tracing::debug!(service = %expect.name, release = ?platform.release, "service checks skipped");
        ServiceProbe::Unavailable("skipped".to_string())
    } else {
        reporter.step(&format!("querying service {}...", expect.name));
        match services.query(&expect.name).await {
            Ok(facts) => {
                tracing::debug!(service = %expect.name, ?facts, "service queried");
                ServiceProbe::Queried(facts)
            }
            Err(e) => {
                tracing::warn!(service = %expect.name, error = %e, "service manager unavailable");
                ServiceProbe::Unavailable(format!("{e:#}"))
            }
        }
    };
    evaluate_service(expect, &probe, platform)
}
