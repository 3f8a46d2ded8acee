// lib/crates/stanza-manifest/src/types.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mode::FileMode;

/// Errors raised while parsing or validating a manifest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("invalid file mode '{0}': expected an octal string such as \"0640\"")]
    InvalidMode(String),

    #[error("manifest entry has an empty path")]
    EmptyPath,

    #[error("path '{0}' is declared more than once")]
    DuplicatePath(String),

    #[error("path '{path}' is not absolute for platform {platform}")]
    RelativePath { path: String, platform: PlatformFamily },

    #[error("service name must not be empty")]
    EmptyServiceName,

    #[error("invalid account name '{name}' on '{path}'")]
    InvalidAccount { path: String, name: String },
}

/// Operating-system family a manifest targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Linux,
    Windows,
}

impl PlatformFamily {
    /// Family of the platform this binary was compiled for.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    /// Lowercase name used in manifests and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
        }
    }

    /// Whether `path` is absolute under this family's rules.
    ///
    /// Checked textually so that Windows manifests can be validated on Linux
    /// and vice versa.
    #[must_use]
    pub fn is_absolute(self, path: &str) -> bool {
        match self {
            Self::Linux => path.starts_with('/'),
            Self::Windows => {
                let bytes = path.as_bytes();
                path.starts_with(r"\\")
                    || (bytes.len() >= 3
                        && bytes[0].is_ascii_alphabetic()
                        && bytes[1] == b':'
                        && (bytes[2] == b'\\' || bytes[2] == b'/'))
            }
        }
    }

    /// Path separator used when joining manifest paths.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Linux => '/',
            Self::Windows => '\\',
        }
    }
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of filesystem object at a path.
///
/// Manifests declare only `file`, `directory` or `symlink`. The special kinds
/// are reported for what was found on disk, so they never match a declaration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    #[default]
    File,
    Directory,
    Symlink,
    #[serde(skip_deserializing)]
    Pipe,
    #[serde(skip_deserializing)]
    Socket,
    #[serde(skip_deserializing)]
    BlockDevice,
    #[serde(skip_deserializing)]
    CharacterDevice,
}

impl FileKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::Pipe => "pipe",
            Self::Socket => "socket",
            Self::BlockDevice => "block_device",
            Self::CharacterDevice => "character_device",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected state of one installed path.
///
/// Absent `mode`/`owner`/`group` are not asserted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileExpectation {
    pub path: String,
    #[serde(default)]
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FileMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Major OS releases on which this path is not installed (Linux only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_on_major_versions: Vec<u32>,
}

impl FileExpectation {
    /// Existence-only expectation for a regular file.
    #[must_use]
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::File,
            mode: None,
            owner: None,
            group: None,
            skip_on_major_versions: Vec::new(),
        }
    }

    /// Existence-only expectation for a directory.
    #[must_use]
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            kind: FileKind::Directory,
            ..Self::file(path)
        }
    }

    /// Assert permission bits.
    #[must_use]
    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Not expected on the given major releases.
    #[must_use]
    pub fn skipped_on_majors(mut self, majors: &[u32]) -> Self {
        self.skip_on_major_versions = majors.to_vec();
        self
    }

    /// Assert owner and group names.
    #[must_use]
    pub fn owned_by(mut self, owner: impl Into<String>, group: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self.group = Some(group.into());
        self
    }
}

/// Expected state of the agent's service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceExpectation {
    pub name: String,
    #[serde(default = "default_true")]
    pub installed: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub running: bool,
    /// Major OS releases on which service checks are skipped (Linux only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_on_major_versions: Vec<u32>,
}

fn default_true() -> bool {
    true
}

/// Full set of expectations for one platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallManifest {
    pub platform: PlatformFamily,
    #[serde(default)]
    pub files: Vec<FileExpectation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceExpectation>,
}

impl InstallManifest {
    /// Check structural rules: non-empty unique absolute paths, sane account
    /// names, non-empty service name.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for entry in &self.files {
            if entry.path.trim().is_empty() {
                return Err(ManifestError::EmptyPath);
            }
            if !self.platform.is_absolute(&entry.path) {
                return Err(ManifestError::RelativePath {
                    path: entry.path.clone(),
                    platform: self.platform,
                });
            }
            if !seen.insert(entry.path.as_str()) {
                return Err(ManifestError::DuplicatePath(entry.path.clone()));
            }
            for name in [&entry.owner, &entry.group].into_iter().flatten() {
                if !is_valid_account_name(name) {
                    return Err(ManifestError::InvalidAccount {
                        path: entry.path.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        if let Some(service) = &self.service
            && service.name.trim().is_empty()
        {
            return Err(ManifestError::EmptyServiceName);
        }
        Ok(())
    }
}

fn is_valid_account_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(':') && !name.chars().any(char::is_whitespace)
}
