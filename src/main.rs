mod cli;
mod config;
mod init;
mod poll;
mod series;
mod sink;

use std::fs::File;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::cli::CmdArgs;
use crate::config::load_config;
use crate::config::monitor_config::MonitorConfig;
use crate::init::init_tracing;
use crate::poll::dispatcher::Dispatcher;
use crate::poll::poller::Poller;
use crate::poll::source::HttpSource;
use crate::poll::ticker::Ticker;
use crate::series::registry::SeriesRegistry;
use crate::sink::chart::Chart;
use crate::sink::text_log::TextLog;

fn main() -> anyhow::Result<()> {
    let args = CmdArgs::parse();

    let loaded = load_config(&args.config)?;
    let found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    args.apply(&mut config);

    init_tracing(config.log.format)?;
    if !found {
        warn!(path = ?args.config, "Config file not found, using defaults");
    }

    let registry = SeriesRegistry::standard();
    for series in registry.iter() {
        info!(
            id = %series.id,
            label = series.label,
            class = series.class_name,
            shape = ?series.style.shape,
            size = series.style.size,
            "Registered series"
        );
    }

    let source = HttpSource::new(&config.base_url, &config.path, config.request_timeout)?;
    let log = TextLog::new(config.log.viewport, config.log.echo);
    let chart = Chart::new(registry.clone());
    let (ticker, stop) = Ticker::new(config.poll_interval);

    ctrlc::set_handler(move || {
        info!("Stop requested");
        stop.stop();
    })
    .context("Failed to install signal handler")?;

    let mut poller = Poller::new(source, Dispatcher::new(registry), log, chart, ticker);
    let summary = poller.run(args.max_cycles);
    let (log, chart) = poller.into_sinks();

    info!(
        cycles = summary.cycles,
        idle = summary.idle,
        failed = summary.failed,
        records = summary.records.total(),
        ignored = summary.records.ignored,
        lines = log.len(),
        points = chart.len(),
        overwrites = chart.upserts() - chart.len() as u64,
        "Done"
    );

    if !config.log.echo && !log.is_empty() {
        for line in log.visible() {
            info!(target: "roast_log", "{line}");
        }
    }
    if chart.is_empty() {
        warn!("No readings received");
    }

    write_exports(&config, &log, &chart)
}

fn write_exports(config: &MonitorConfig, log: &TextLog, chart: &Chart) -> anyhow::Result<()> {
    if let Some(path) = &config.chart.export_path {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        chart.write_csv(file)?;
        info!(?path, points = chart.len(), "Exported chart");
    }

    if let Some(path) = &config.log.export_path {
        std::fs::write(path, log.render())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(?path, lines = log.len(), "Exported text log");
    }

    Ok(())
}
