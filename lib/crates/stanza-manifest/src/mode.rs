// lib/crates/stanza-manifest/src/mode.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ManifestError;

/// Mask of the permission bits a manifest may assert (setuid/setgid/sticky + rwx).
pub const MODE_MASK: u32 = 0o7777;

/// Unix permission bits, written in manifests as an octal string.
///
/// Accepted spellings: `"0640"`, `"640"`, `"0o640"`. Always rendered with four
/// digits so that `0640` compares equal to what operators type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileMode(u32);

impl FileMode {
    /// Build a mode from raw bits. Bits outside [`MODE_MASK`] (file type) are dropped.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & MODE_MASK)
    }

    /// Raw permission bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Parse an octal mode string.
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0o")
            .or_else(|| trimmed.strip_prefix("0O"))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(ManifestError::InvalidMode(raw.to_string()));
        }
        let bits =
            u32::from_str_radix(digits, 8).map_err(|_| ManifestError::InvalidMode(raw.to_string()))?;
        if bits > MODE_MASK {
            return Err(ManifestError::InvalidMode(raw.to_string()));
        }
        Ok(Self(bits))
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl TryFrom<String> for FileMode {
    type Error = ManifestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FileMode> for String {
    fn from(mode: FileMode) -> Self {
        mode.to_string()
    }
}
