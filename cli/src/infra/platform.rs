//! Host platform detection: implements `PlatformProbe`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use stanza_manifest::PlatformFamily;

use crate::application::ports::PlatformProbe;
use crate::domain::platform::{
    Platform, parse_os_release, parse_redhat_release, redhat_release_distro,
};

pub const OS_RELEASE_PATH: &str = "/etc/os-release";
/// Older Red Hat family releases (EL6) ship these instead of `os-release`.
pub const RELEASE_FALLBACKS: &[&str] = &["/etc/redhat-release", "/etc/system-release"];

/// Reads the release files of the running host.
pub struct HostPlatformProbe {
    os_release: PathBuf,
    fallbacks: Vec<PathBuf>,
}

impl HostPlatformProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::with_paths(
            OS_RELEASE_PATH,
            RELEASE_FALLBACKS.iter().map(PathBuf::from).collect(),
        )
    }

    /// Probe reading release files from custom locations.
    #[must_use]
    pub fn with_paths(os_release: impl Into<PathBuf>, fallbacks: Vec<PathBuf>) -> Self {
        Self {
            os_release: os_release.into(),
            fallbacks,
        }
    }

    fn detect_linux(&self) -> Platform {
        let mut platform = Platform::new(PlatformFamily::Linux);

        if let Some(content) = read_optional(&self.os_release) {
            let release = parse_os_release(&content);
            platform.distro = release.id;
            platform.release = release.version_id;
        }
        if platform.release.is_some() {
            return platform;
        }

        for path in &self.fallbacks {
            let Some(content) = read_optional(path) else {
                continue;
            };
            if let Some(version) = parse_redhat_release(&content) {
                platform.release = Some(version);
                if platform.distro.is_none() {
                    platform.distro = redhat_release_distro(&content);
                }
                break;
            }
        }

        if platform.release.is_none() {
            tracing::warn!("cannot determine OS release; release-specific rules will not apply");
        }
        platform
    }
}

impl Default for HostPlatformProbe {
    fn default() -> Self {
        Self::new()
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "release file not readable");
            None
        }
    }
}

impl PlatformProbe for HostPlatformProbe {
    fn detect(&self) -> Result<Platform> {
        let platform = match std::env::consts::OS {
            "linux" => self.detect_linux(),
            "windows" => Platform::new(PlatformFamily::Windows),
            other => {
                return Err(crate::domain::error::PlatformError::Unsupported(other.to_string()).into());
            }
        };
        tracing::debug!(platform = %platform.describe(), "host platform detected");
        Ok(platform)
    }
}
