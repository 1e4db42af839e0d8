use chrono::{NaiveDateTime, Timelike};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::utils;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Local wall-clock time source
pub trait Clock: Send + 'static {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A request to run one due scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub at: NaiveDateTime,
}

impl Tick {
    /// Time of day of the tick as `HH:MM`
    pub fn hhmm(&self) -> String {
        utils::hhmm_of(self.at)
    }
}

/// Time left until the next wall-clock minute starts
pub fn delay_to_next_minute(now: NaiveDateTime) -> Duration {
    let into_minute_ms = u64::from(now.second()) * 1000 + u64::from(now.nanosecond() / 1_000_000).min(999);
    Duration::from_millis(60_000 - into_minute_ms)
}

/// Periodic ticker: one tick at start, one at the next minute boundary, then
/// one every interval. Ticks are delivered over a channel so a single
/// consumer runs the scans one after another.
pub struct Scheduler<C: Clock> {
    clock: C,
    interval: Duration,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Spawn the ticker thread
    pub fn start(self) -> std::io::Result<(SchedulerHandle, Receiver<Tick>)> {
        let (tick_tx, tick_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();
        let thread = std::thread::Builder::new()
            .name("meditrak-scheduler".to_string())
            .spawn(move || self.run(tick_tx, stop_rx))?;

        Ok((
            SchedulerHandle {
                stop_tx: Some(stop_tx),
                thread: Some(thread),
            },
            tick_rx,
        ))
    }

    fn run(self, ticks: Sender<Tick>, stop: Receiver<()>) {
        tracing::debug!(interval_secs = self.interval.as_secs(), "scheduler started");
        if !self.emit(&ticks) {
            return;
        }

        let mut wait = delay_to_next_minute(self.clock.now());
        loop {
            match stop.recv_timeout(wait) {
                Err(RecvTimeoutError::Timeout) => {
                    if !self.emit(&ticks) {
                        break;
                    }
                    wait = self.interval;
                }
                // Explicit stop, or the handle was dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("scheduler stopped");
    }

    /// Send a tick; false once nobody is listening
    fn emit(&self, ticks: &Sender<Tick>) -> bool {
        ticks.send(Tick { at: self.clock.now() }).is_ok()
    }
}

/// Stops the ticker thread on `stop()` or drop
pub struct SchedulerHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("scheduler thread panicked");
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
