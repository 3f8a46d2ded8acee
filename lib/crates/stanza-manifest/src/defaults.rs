// lib/crates/stanza-manifest/src/defaults.rs
//! Built-in expectations for the stanza package as shipped by observIQ.

use serde::{Deserialize, Serialize};

use crate::mode::FileMode;
use crate::types::{FileExpectation, InstallManifest, PlatformFamily, ServiceExpectation};

pub const DEFAULT_LINUX_ROOT: &str = "/opt/observiq/stanza";
pub const DEFAULT_WINDOWS_ROOT: &str = r"C:\observiq\stanza";
pub const DEFAULT_ACCOUNT: &str = "stanza";
pub const DEFAULT_SERVICE: &str = "stanza";

/// systemd unit installed by the Linux package.
pub const SYSTEMD_UNIT_DIR: &str = "/etc/systemd/system";

/// EL6 ships SysV init, so neither the systemd unit nor the service checks
/// apply there.
pub const LINUX_SERVICE_SKIP_MAJORS: &[u32] = &[6];

/// Where the package is installed and which accounts own it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallLayout {
    pub root: String,
    pub owner: String,
    pub group: String,
    pub service: String,
}

impl InstallLayout {
    /// Stock layout for `platform`.
    #[must_use]
    pub fn for_platform(platform: PlatformFamily) -> Self {
        let root = match platform {
            PlatformFamily::Linux => DEFAULT_LINUX_ROOT,
            PlatformFamily::Windows => DEFAULT_WINDOWS_ROOT,
        };
        Self {
            root: root.to_string(),
            owner: DEFAULT_ACCOUNT.to_string(),
            group: DEFAULT_ACCOUNT.to_string(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }

    fn child(&self, platform: PlatformFamily, name: &str) -> String {
        let sep = platform.separator();
        let root = self.root.trim_end_matches(['/', '\\']);
        format!("{root}{sep}{name}")
    }
}

impl InstallManifest {
    /// Built-in manifest for `platform` rooted at `layout`.
    #[must_use]
    pub fn for_platform(platform: PlatformFamily, layout: &InstallLayout) -> Self {
        match platform {
            PlatformFamily::Linux => Self::default_linux(layout),
            PlatformFamily::Windows => Self::default_windows(layout),
        }
    }

    /// Linux package: every artifact owned by the service account, the
    /// offset database private to it, and the systemd unit owned by root.
    #[must_use]
    pub fn default_linux(layout: &InstallLayout) -> Self {
        let p = PlatformFamily::Linux;
        let owned = |entry: FileExpectation, bits: u32| {
            entry
                .with_mode(FileMode::from_bits(bits))
                .owned_by(&layout.owner, &layout.group)
        };
        let root = layout.root.trim_end_matches('/');
        let root = if root.is_empty() { "/" } else { root };

        let files = vec![
            owned(FileExpectation::directory(root), 0o755),
            owned(FileExpectation::file(layout.child(p, "stanza")), 0o755),
            owned(FileExpectation::file(layout.child(p, "config.yaml")), 0o640),
            owned(FileExpectation::file(layout.child(p, "logging.yaml")), 0o640),
            owned(FileExpectation::directory(layout.child(p, "plugins")), 0o755),
            owned(FileExpectation::directory(layout.child(p, "log")), 0o750),
            owned(FileExpectation::file(layout.child(p, "stanza.db")), 0o600),
            FileExpectation::file(format!("{SYSTEMD_UNIT_DIR}/{}.service", layout.service))
                .with_mode(FileMode::from_bits(0o644))
                .owned_by("root", "root")
                .skipped_on_majors(LINUX_SERVICE_SKIP_MAJORS),
        ];

        Self {
            platform: p,
            files,
            service: Some(ServiceExpectation {
                name: layout.service.clone(),
                installed: true,
                enabled: true,
                running: true,
                skip_on_major_versions: LINUX_SERVICE_SKIP_MAJORS.to_vec(),
            }),
        }
    }

    /// Windows package: existence of the install tree only.
    #[must_use]
    pub fn default_windows(layout: &InstallLayout) -> Self {
        let p = PlatformFamily::Windows;
        let root = layout.root.trim_end_matches(['/', '\\']).to_string();
        let files = vec![
            FileExpectation::directory(root),
            FileExpectation::file(layout.child(p, "stanza.exe")),
            FileExpectation::file(layout.child(p, "config.yaml")),
            FileExpectation::file(layout.child(p, "logging.yaml")),
            FileExpectation::directory(layout.child(p, "plugins")),
            FileExpectation::directory(layout.child(p, "log")),
            FileExpectation::file(layout.child(p, "stanza.db")),
        ];

        Self {
            platform: p,
            files,
            service: Some(ServiceExpectation {
                name: layout.service.clone(),
                installed: true,
                enabled: true,
                running: true,
                skip_on_major_versions: Vec::new(),
            }),
        }
    }
}
