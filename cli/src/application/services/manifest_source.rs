//! Application service: choose which manifest a run verifies against.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stanza_manifest::{InstallManifest, PlatformFamily};

use crate::application::ports::ManifestStore;
use crate::domain::config::VerifyConfig;
use crate::domain::error::PlatformError;

/// Where the effective manifest came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOrigin {
    /// `--manifest` on the command line.
    Flag(PathBuf),
    /// `manifest:` in the configuration file.
    Config(PathBuf),
    /// Built-in stanza expectations for the platform.
    BuiltIn,
}

impl fmt::Display for ManifestOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(p) | Self::Config(p) => write!(f, "{}", p.display()),
            Self::BuiltIn => f.write_str("built-in"),
        }
    }
}

/// Effective manifest plus its origin.
#[derive(Debug, Clone)]
pub struct ResolvedManifest {
    pub manifest: InstallManifest,
    pub origin: ManifestOrigin,
}

/// Resolve the manifest: `--manifest`, then the configured path, then the
/// built-in default for `platform` using the configured layout.
///
/// `root_override` only applies to the built-in manifest.
///
/// # Errors
///
/// Returns an error if a manifest file cannot be loaded or targets a
/// different platform family than `platform`.
pub fn resolve_manifest(
    store: &impl ManifestStore,
    config: &VerifyConfig,
    platform: PlatformFamily,
    manifest_override: Option<&Path>,
    root_override: Option<&str>,
) -> Result<ResolvedManifest> {
    let origin = match (manifest_override, &config.manifest) {
        (Some(path), _) => ManifestOrigin::Flag(path.to_path_buf()),
        (None, Some(path)) => ManifestOrigin::Config(path.clone()),
        (None, None) => ManifestOrigin::BuiltIn,
    };

    let manifest = match &origin {
        ManifestOrigin::Flag(path) | ManifestOrigin::Config(path) => {
            if root_override.is_some() {
                tracing::warn!(manifest = %path.display(), "--root is ignored when a manifest file is used");
            }
            let manifest = store
                .load(path)
                .with_context(|| format!("cannot load manifest {}", path.display()))?;
            if manifest.platform != platform {
                return Err(PlatformError::ManifestMismatch {
                    manifest: manifest.platform,
                    host: platform,
                }
                .into());
            }
            manifest
        }
        ManifestOrigin::BuiltIn => {
            InstallManifest::for_platform(platform, &config.layout(platform, root_override))
        }
    };

    tracing::debug!(
        origin = %origin,
        files = manifest.files.len(),
        service = manifest.service.as_ref().map(|s| s.name.as_str()),
        "manifest resolved"
    );

    Ok(ResolvedManifest { manifest, origin })
}
