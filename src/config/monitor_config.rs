use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// Mirror text records into the process log.
    #[serde(default = "super::default_echo")]
    pub echo: bool,
    #[serde(default = "super::default_viewport")]
    pub viewport: usize,
    /// Where the rendered text log is written when polling stops.
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            echo: super::default_echo(),
            viewport: super::default_viewport(),
            export_path: None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct ChartConfig {
    /// Where the chart is written as CSV when polling stops.
    pub export_path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct MonitorConfig {
    #[serde(default = "super::default_base_url")]
    pub base_url: String,
    #[serde(default = "super::default_path")]
    pub path: String,
    #[serde(with = "humantime_serde", default = "super::default_poll_interval")]
    pub poll_interval: std::time::Duration,
    #[serde(with = "humantime_serde", default = "super::default_request_timeout")]
    pub request_timeout: std::time::Duration,

    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: super::default_base_url(),
            path: super::default_path(),
            poll_interval: super::default_poll_interval(),
            request_timeout: super::default_request_timeout(),
            log: LogConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}
