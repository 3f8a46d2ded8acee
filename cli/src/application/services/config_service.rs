//! Application service: configuration use-cases.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::VerifyConfig;

/// Load and validate configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds invalid values.
pub fn load_config(store: &impl ConfigStore) -> Result<VerifyConfig> {
    let config = store.load()?;
    config.validate().with_context(|| match store.path() {
        Ok(path) => format!("invalid configuration in {}", path.display()),
        Err(_) => "invalid configuration".to_string(),
    })?;
    Ok(config)
}
