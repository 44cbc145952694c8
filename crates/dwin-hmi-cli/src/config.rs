//! Resolving the serial configuration from file, environment and flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dwin_hmi_serial::SerialConfig;

use crate::args::ConnectionArgs;

/// Load a `SerialConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<SerialConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Build the serial config: defaults, then the config file, then flags/env.
pub fn resolve(args: &ConnectionArgs) -> Result<SerialConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => SerialConfig::default(),
    };

    if let Some(port) = &args.port {
        config.port = port.clone();
    }
    if let Some(baud) = args.baud {
        config.baud_rate = baud;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }

    config
        .validate()
        .context("use --port, HMI_PORT or a config file to select the display")?;
    Ok(config)
}
