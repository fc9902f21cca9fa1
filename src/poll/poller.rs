use std::time::Instant;

use tracing::{debug, info, warn};

use crate::poll::dispatcher::{DispatchStats, Dispatcher};
use crate::poll::error::PollError;
use crate::poll::source::MessageSource;
use crate::poll::ticker::Ticker;
use crate::sink::{LogSink, SeriesSink};

#[derive(Debug)]
pub enum CycleOutcome {
    /// Nothing new on the server.
    Idle,
    Dispatched(DispatchStats),
    Failed(PollError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    pub cycles: u64,
    pub idle: u64,
    pub failed: u64,
    pub records: DispatchStats,
}

impl PollSummary {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Idle => self.idle += 1,
            CycleOutcome::Dispatched(stats) => self.records.add(*stats),
            CycleOutcome::Failed(_) => self.failed += 1,
        }
    }
}

pub struct Poller<S, L, C> {
    source: S,
    dispatcher: Dispatcher,
    log: L,
    chart: C,
    ticker: Ticker,
}

impl<S, L, C> Poller<S, L, C>
where
    S: MessageSource,
    L: LogSink,
    C: SeriesSink,
{
    pub fn new(source: S, dispatcher: Dispatcher, log: L, chart: C, ticker: Ticker) -> Self {
        Poller {
            source,
            dispatcher,
            log,
            chart,
            ticker,
        }
    }

    pub fn run_cycle(&mut self) -> CycleOutcome {
        match self.source.fetch() {
            Ok(Some(records)) if !records.is_empty() => {
                let stats = self
                    .dispatcher
                    .dispatch(&records, &mut self.log, &mut self.chart);
                debug!(?stats, "Dispatched records");
                CycleOutcome::Dispatched(stats)
            }
            Ok(_) => CycleOutcome::Idle,
            Err(err) => CycleOutcome::Failed(err),
        }
    }

    /// Polls until stopped, or until `max_cycles` cycles have run.
    ///
    /// A failed cycle is rescheduled like any other.
    pub fn run(&mut self, max_cycles: Option<u64>) -> PollSummary {
        let mut summary = PollSummary::default();
        info!(
            interval = %humantime::format_duration(self.ticker.interval()),
            ?max_cycles,
            "Starting poll loop"
        );

        while !self.ticker.is_stopped() {
            let cycle_start = Instant::now();
            let outcome = self.run_cycle();
            if let CycleOutcome::Failed(err) = &outcome {
                warn!(%err, cycle = summary.cycles + 1, "Poll failed");
            }
            summary.record(&outcome);

            if max_cycles.is_some_and(|max| summary.cycles >= max) {
                break;
            }
            if !self.ticker.wait_next(cycle_start) {
                break;
            }
        }

        info!(?summary, "Poll loop finished");
        summary
    }

    pub fn into_sinks(self) -> (L, C) {
        (self.log, self.chart)
    }
}
