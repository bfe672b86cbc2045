//! Simulated download: a ticker advances progress by random amounts until 100.

mod increment;
mod progress;

pub use increment::{IncrementSource, ScriptedIncrements, SystemIncrements};
pub use progress::{Progress, COMPLETE};

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::control::CancelToken;

/// Default ticker period.
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);
/// Default upper bound (exclusive) of one increment.
pub const DEFAULT_MAX_INCREMENT: f64 = 10.0;

/// Download state as seen by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadState {
    #[default]
    Idle,
    Downloading,
    Completed,
    Cancelled,
}

/// How a simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationOutcome {
    Completed { ticks: u32 },
    /// Cancelled before completion; `progress` is what was discarded.
    Cancelled { progress: f64 },
}

/// Timer-driven progress generator.
#[derive(Clone)]
pub struct DownloadSimulator {
    tick: Duration,
    max_increment: f64,
    source: Arc<dyn IncrementSource>,
}

impl DownloadSimulator {
    /// A non-finite or non-positive `max_increment` could never reach 100 and
    /// is replaced by [`DEFAULT_MAX_INCREMENT`].
    pub fn new(tick: Duration, max_increment: f64, source: Arc<dyn IncrementSource>) -> Self {
        let max_increment = if max_increment.is_finite() && max_increment > 0.0 {
            max_increment
        } else {
            tracing::warn!(max_increment, "invalid increment bound; using default");
            DEFAULT_MAX_INCREMENT
        };
        Self {
            tick,
            max_increment,
            source,
        }
    }

    /// Simulator with default timing and OS randomness.
    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_TICK,
            DEFAULT_MAX_INCREMENT,
            Arc::new(SystemIncrements::new()),
        )
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn max_increment(&self) -> f64 {
        self.max_increment
    }

    /// Runs one simulated download from 0. `on_progress` is called after every
    /// tick with the new value; the last call on completion carries 100.
    pub async fn run<F>(&self, cancel: &CancelToken, mut on_progress: F) -> SimulationOutcome
    where
        F: FnMut(Progress),
    {
        let mut progress = Progress::default();
        let mut ticks = 0u32;
        let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(progress = progress.value(), "simulated download cancelled");
                    return SimulationOutcome::Cancelled { progress: progress.value() };
                }
                _ = ticker.tick() => {
                    ticks += 1;
                    let done = progress.advance(self.source.next_increment(self.max_increment));
                    on_progress(progress);
                    if done {
                        return SimulationOutcome::Completed { ticks };
                    }
                }
            }
        }
    }
}
