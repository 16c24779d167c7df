//! Application service: configuration use-cases.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::LabConfig;
use crate::domain::config::apply_setting;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<LabConfig> {
    store.load()
}

/// Validate `value` for `key`, store it and return the updated config.
///
/// Nothing is written when validation fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<LabConfig> {
    let mut config = store.load()?;
    apply_setting(&mut config, key, value)?;
    store
        .save(&config)
        .with_context(|| format!("saving {key}"))?;
    Ok(config)
}
