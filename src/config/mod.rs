use std::path::Path;
use std::time::Duration;

use anyhow::Context;

pub mod monitor_config;

use monitor_config::MonitorConfig;

pub(crate) fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

pub(crate) fn default_path() -> String {
    "/message".to_string()
}

pub(crate) fn default_poll_interval() -> Duration {
    Duration::from_millis(1000)
}

pub(crate) fn default_request_timeout() -> Duration {
    Duration::from_secs(5)
}

pub(crate) fn default_viewport() -> usize {
    40
}

pub(crate) fn default_echo() -> bool {
    true
}

/// Reads the TOML config at `path`. `Ok(None)` when there is no such file.
pub fn load_config(path: &Path) -> anyhow::Result<Option<MonitorConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(Some(config))
}
