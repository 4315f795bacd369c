use std::fs;
use std::path::Path;

use anyhow::Context;
use filesend_core::SendOptions;

/// Reads send options from a TOML file. Keys match [`SendOptions`] fields.
pub fn load_options(path: &Path) -> anyhow::Result<SendOptions> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;

    toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
}
