use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::monitor_config::MonitorConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = r###"roast_monitor"###)]
pub struct CmdArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "/etc/roast_monitor/monitor.toml")]
    pub config: PathBuf,

    /// Base URL of the monitor server, e.g. http://127.0.0.1:5000
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Delay between the starts of two polls, e.g. 500ms or 2s.
    #[arg(short, long, value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Stop after this many polls.
    #[arg(long)]
    pub max_cycles: Option<u64>,

    /// Write the chart as CSV here when polling stops.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write the text log here when polling stops.
    #[arg(long)]
    pub export_log: Option<PathBuf>,
}

impl CmdArgs {
    pub fn apply(&self, config: &mut MonitorConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.base_url = endpoint.clone();
        }
        if let Some(interval) = self.interval {
            config.poll_interval = interval;
        }
        if let Some(export) = &self.export {
            config.chart.export_path = Some(export.clone());
        }
        if let Some(export_log) = &self.export_log {
            config.log.export_path = Some(export_log.clone());
        }
    }
}
