use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

/// Paces poll cycles: each cycle starts one interval after the previous one started.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    stop_rx: Receiver<()>,
    stopped: bool,
}

#[derive(Debug, Clone)]
pub struct StopHandle {
    stop_tx: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        // The ticker may already be gone.
        let _ = self.stop_tx.send(());
    }
}

impl Ticker {
    pub fn new(interval: Duration) -> (Self, StopHandle) {
        let (stop_tx, stop_rx) = mpsc::channel();
        let ticker = Ticker {
            interval,
            stop_rx,
            stopped: false,
        };
        (ticker, StopHandle { stop_tx })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_stopped(&mut self) -> bool {
        if !self.stopped && self.stop_rx.try_recv().is_ok() {
            self.stopped = true;
        }
        self.stopped
    }

    /// Blocks until the next cycle is due. Returns `false` once stopped.
    pub fn wait_next(&mut self, cycle_start: Instant) -> bool {
        if self.is_stopped() {
            return false;
        }

        let remaining = self.interval.saturating_sub(cycle_start.elapsed());
        match self.stop_rx.recv_timeout(remaining) {
            Ok(()) => {
                self.stopped = true;
                false
            }
            Err(RecvTimeoutError::Timeout) => true,
            Err(RecvTimeoutError::Disconnected) => {
                // Nobody can stop us anymore; keep pacing with a plain sleep.
                std::thread::sleep(self.interval.saturating_sub(cycle_start.elapsed()));
                true
            }
        }
    }
}
