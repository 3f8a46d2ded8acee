//! Host platform model and release-file parsing.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use anyhow::Result;
use serde::Serialize;
use stanza_manifest::{FileExpectation, PlatformFamily, ServiceExpectation};

use crate::domain::error::PlatformError;

/// Which file attributes can be asserted on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributePolicy {
    /// Type, mode, owner and group are compared.
    Full,
    /// Only existence is asserted (Windows ACLs do not map to mode bits).
    ExistenceOnly,
}

/// Detected (or overridden) host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub family: PlatformFamily,
    /// Distribution id (`ubuntu`, `centos`, …), Linux only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distro: Option<String>,
    /// Release string, e.g. `"22.04"` or `"6.10"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
}

impl Platform {
    #[must_use]
    pub fn new(family: PlatformFamily) -> Self {
        Self {
            family,
            distro: None,
            release: None,
        }
    }

    #[must_use]
    pub fn with_release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    /// Apply `--platform` / `--release` overrides to a detected platform.
    ///
    /// Switching family drops the detected distribution and release, since
    /// they describe a different OS.
    ///
    /// # Errors
    ///
    /// Returns an error if `release` does not start with a digit.
    pub fn with_overrides(
        self,
        family: Option<PlatformFamily>,
        release: Option<&str>,
    ) -> Result<Self> {
        let mut platform = match family {
            Some(family) if family != self.family => Self::new(family),
            _ => self,
        };
        if let Some(release) = release {
            let release = release.trim();
            if !release.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(PlatformError::InvalidRelease(release.to_string()).into());
            }
            platform.release = Some(release.to_string());
        }
        Ok(platform)
    }

    /// Leading integer of the release string.
    #[must_use]
    pub fn major_version(&self) -> Option<u32> {
        let release = self.release.as_deref()?.trim();
        let digits: String = release.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }

    /// Release-specific skips apply only on Linux, and only when the major
    /// version is known and listed.
    #[must_use]
    pub fn skips_major(&self, majors: &[u32]) -> bool {
        self.family == PlatformFamily::Linux
            && self
                .major_version()
                .is_some_and(|major| majors.contains(&major))
    }

    #[must_use]
    pub fn service_checks_skipped(&self, service: &ServiceExpectation) -> bool {
        self.skips_major(&service.skip_on_major_versions)
    }

    /// The path is not installed on this release, e.g. the systemd unit on EL6.
    #[must_use]
    pub fn file_checks_skipped(&self, file: &FileExpectation) -> bool {
        self.skips_major(&file.skip_on_major_versions)
    }

    /// Reason attached to checks skipped by `skips_major`.
    #[must_use]
    pub fn skip_reason(&self) -> String {
        format!(
            "not applicable on {} major version {}",
            self.family,
            self.major_version().unwrap_or_default()
        )
    }

    #[must_use]
    pub fn attribute_policy(&self) -> AttributePolicy {
        match self.family {
            PlatformFamily::Linux => AttributePolicy::Full,
            PlatformFamily::Windows => AttributePolicy::ExistenceOnly,
        }
    }

    /// One-line description for report headers.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = self.family.to_string();
        if let Some(distro) = &self.distro {
            out.push(' ');
            out.push_str(distro);
        }
        if let Some(release) = &self.release {
            out.push(' ');
            out.push_str(release);
        }
        out
    }
}

/// Fields of interest from `/etc/os-release`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: Option<String>,
    pub version_id: Option<String>,
}

/// Parse `os-release(5)` content. Later assignments win, quotes are stripped.
#[must_use]
pub fn parse_os_release(content: &str) -> OsRelease {
    let mut out = OsRelease::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value.trim());
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "ID" => out.id = Some(value.to_string()),
            "VERSION_ID" => out.version_id = Some(value.to_string()),
            _ => {}
        }
    }
    out
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Extract the version from a `/etc/redhat-release` style line, e.g.
/// `"CentOS release 6.10 (Final)"` → `"6.10"`.
#[must_use]
pub fn parse_redhat_release(content: &str) -> Option<String> {
    let line = content.lines().next()?;
    let mut words = line.split_whitespace();
    words.find(|w| w.eq_ignore_ascii_case("release"))?;
    let version = words.next()?;
    version
        .starts_with(|c: char| c.is_ascii_digit())
        .then(|| version.to_string())
}

/// Lowercased distribution name from the first word of a redhat-release line.
#[must_use]
pub fn redhat_release_distro(content: &str) -> Option<String> {
    content
        .split_whitespace()
        .next()
        .map(str::to_ascii_lowercase)
}

// ── Unit tests ────────────────────────────────────────────────────────────────
