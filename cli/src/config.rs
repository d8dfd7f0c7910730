//! Protocol configuration loading

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use udtswap_common::ProtocolConfig;

/// Load the protocol configuration from a TOML file, or the default fee
/// schedule when no file is given
///
/// A file is validated on load. The defaults carry no script code hashes and
/// only serve quoting and `udtswap config`.
pub fn load_protocol_config(path: Option<&Path>) -> Result<ProtocolConfig> {
    let Some(path) = path else {
        log::debug!("No config file given, using defaults");
        return Ok(ProtocolConfig::default());
    };

    if !path.exists() {
        anyhow::bail!(
            "Config file not found: {}\n\
             Write the defaults with: udtswap config > {}",
            path.display(),
            path.display()
        );
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ProtocolConfig = toml::from_str(&data)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    log::debug!("Loaded protocol config from {}", path.display());
    Ok(config)
}

/// Render a configuration as TOML
pub fn render_protocol_config(config: &ProtocolConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize protocol config")
}
