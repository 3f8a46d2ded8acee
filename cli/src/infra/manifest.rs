//! Manifest files on disk: implements `ManifestStore`.
//!
//! `.json` files are parsed as JSON, everything else as YAML.

use std::path::Path;

use anyhow::{Context, Result};
use stanza_manifest::InstallManifest;

use crate::application::ports::ManifestStore;

pub struct FileManifestStore;

impl ManifestStore for FileManifestStore {
    fn load(&self, path: &Path) -> Result<InstallManifest> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let manifest: InstallManifest = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        };
        manifest
            .validate()
            .with_context(|| format!("invalid manifest {}", path.display()))?;
        Ok(manifest)
    }
}
