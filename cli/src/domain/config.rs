//! Domain types and validators for the verifier configuration.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use stanza_manifest::{InstallLayout, PlatformFamily};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "install_dir",
    "owner",
    "group",
    "service",
    "manifest",
    "command_timeout_secs",
];

pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "STANZA_VERIFY_CONFIG";

// ── Config schema ────────────────────────────────────────────────────────────

/// Configuration stored in `<config_dir>/stanza-verify/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifyConfig {
    /// Install root; the platform default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,
    /// Account expected to own the install tree.
    pub owner: String,
    /// Group expected to own the install tree.
    pub group: String,
    /// Service name registered with the service manager.
    pub service: String,
    /// Custom manifest replacing the built-in expectations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    /// Timeout for `systemctl` / `sc.exe` invocations.
    pub command_timeout_secs: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            install_dir: None,
            owner: stanza_manifest::defaults::DEFAULT_ACCOUNT.to_string(),
            group: stanza_manifest::defaults::DEFAULT_ACCOUNT.to_string(),
            service: stanza_manifest::defaults::DEFAULT_SERVICE.to_string(),
            manifest: None,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl VerifyConfig {
    /// Reject values that would make every check meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error if an account or service name is blank or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("owner", &self.owner),
            ("group", &self.group),
            ("service", &self.service),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field }.into());
            }
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout.into());
        }
        Ok(())
    }

    /// Install layout for `platform`, with `root_override` taking precedence
    /// over the configured `install_dir`.
    #[must_use]
    pub fn layout(&self, platform: PlatformFamily, root_override: Option<&str>) -> InstallLayout {
        let mut layout = InstallLayout::for_platform(platform);
        if let Some(root) = root_override {
            layout.root = root.to_string();
        } else if let Some(dir) = &self.install_dir {
            layout.root = dir.display().to_string();
        }
        layout.owner.clone_from(&self.owner);
        layout.group.clone_from(&self.group);
        layout.service.clone_from(&self.service);
        layout
    }

    /// Look up a single setting by key, rendered as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a known setting.
    pub fn get(&self, key: &str) -> Result<String> {
        validate_config_key(key)?;
        let path_or_unset = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
        };
        Ok(match key {
            "install_dir" => path_or_unset(&self.install_dir),
            "owner" => self.owner.clone(),
            "group" => self.group.clone(),
            "service" => self.service.clone(),
            "manifest" => path_or_unset(&self.manifest),
            _ => self.command_timeout_secs.to_string(),
        })
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
