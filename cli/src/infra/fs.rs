//! Filesystem infrastructure: implements `FileInspector` against the local host.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use stanza_manifest::FileKind;

use crate::application::ports::FileInspector;
use crate::domain::check::{FileFacts, FileProbe};

pub const PASSWD_PATH: &str = "/etc/passwd";
pub const GROUP_PATH: &str = "/etc/group";

// ── Account name resolution ──────────────────────────────────────────────────

/// uid/gid → name tables, read once from `/etc/passwd` and `/etc/group`.
#[derive(Debug, Default, Clone)]
pub struct AccountDb {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl AccountDb {
    #[must_use]
    pub fn new(users: HashMap<u32, String>, groups: HashMap<u32, String>) -> Self {
        Self { users, groups }
    }

    /// Load the local account databases. Unreadable files yield empty tables,
    /// in which case ids are reported numerically.
    #[must_use]
    pub fn load() -> Self {
        let read = |path: &str| {
            std::fs::read_to_string(path)
                .inspect_err(|e| tracing::warn!(path, error = %e, "cannot read account database"))
                .unwrap_or_default()
        };
        Self {
            users: parse_id_table(&read(PASSWD_PATH)),
            groups: parse_id_table(&read(GROUP_PATH)),
        }
    }

    /// Name for `uid`, or the number itself when unknown.
    #[must_use]
    pub fn user_name(&self, uid: u32) -> String {
        self.users
            .get(&uid)
            .cloned()
            .unwrap_or_else(|| uid.to_string())
    }

    /// Name for `gid`, or the number itself when unknown.
    #[must_use]
    pub fn group_name(&self, gid: u32) -> String {
        self.groups
            .get(&gid)
            .cloned()
            .unwrap_or_else(|| gid.to_string())
    }
}

/// Parse `passwd(5)` or `group(5)` content into an id → name map.
///
/// Both formats carry the name in field 1 and the numeric id in field 3.
/// The first entry for an id wins, matching `getpwuid(3)`.
#[must_use]
pub fn parse_id_table(content: &str) -> HashMap<u32, String> {
    let mut out = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(':');
        let (Some(name), Some(_), Some(id)) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        if name.is_empty() || name.starts_with(['+', '-']) {
            continue;
        }
        if let Ok(id) = id.parse::<u32>() {
            out.entry(id).or_insert_with(|| name.to_string());
        }
    }
    out
}

// ── FileInspector ─────────────────────────────────────────────────────────────

/// Production filesystem implementation of `FileInspector`.
pub struct LocalFileInspector {
    accounts: AccountDb,
}

impl LocalFileInspector {
    /// Inspector backed by the host account databases.
    #[must_use]
    pub fn new() -> Self {
        let accounts = if cfg!(unix) {
            AccountDb::load()
        } else {
            AccountDb::default()
        };
        Self { accounts }
    }

    /// Inspector with explicit account tables (used in tests).
    #[must_use]
    pub fn with_accounts(accounts: AccountDb) -> Self {
        Self { accounts }
    }
}

impl Default for LocalFileInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileInspector for LocalFileInspector {
    fn inspect(&self, path: &Path) -> FileProbe {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return FileProbe::Missing,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot inspect path");
                return FileProbe::Unreadable(e.to_string());
            }
        };

        FileProbe::Found(self.facts(file_kind(meta.file_type()), &meta))
    }
}

/// Map a file type to a `FileKind` without following symlinks.
fn file_kind(file_type: std::fs::FileType) -> FileKind {
    if file_type.is_symlink() {
        return FileKind::Symlink;
    }
    if file_type.is_dir() {
        return FileKind::Directory;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_fifo() {
            return FileKind::Pipe;
        }
        if file_type.is_socket() {
            return FileKind::Socket;
        }
        if file_type.is_block_device() {
            return FileKind::BlockDevice;
        }
        if file_type.is_char_device() {
            return FileKind::CharacterDevice;
        }
    }
    FileKind::File
}

impl LocalFileInspector {
    #[cfg(unix)]
    fn facts(&self, kind: FileKind, meta: &std::fs::Metadata) -> FileFacts {
        use std::os::unix::fs::MetadataExt;
        FileFacts {
            kind,
            mode: Some(stanza_manifest::FileMode::from_bits(meta.mode())),
            owner: Some(self.accounts.user_name(meta.uid())),
            group: Some(self.accounts.group_name(meta.gid())),
        }
    }

    #[cfg(not(unix))]
    fn facts(&self, kind: FileKind, _meta: &std::fs::Metadata) -> FileFacts {
        let _ = &self.accounts;
        FileFacts {
            kind,
            mode: None,
            owner: None,
            group: None,
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
