//! Sources of per-tick progress increments.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use ring::rand::{SecureRandom, SystemRandom};

/// Produces the amount progress advances on one tick.
pub trait IncrementSource: Send + Sync {
    /// Returns a value in `[0, max)`.
    fn next_increment(&self, max: f64) -> f64;
}

/// Uniform random increments from the OS generator.
pub struct SystemIncrements {
    rng: SystemRandom,
}

impl SystemIncrements {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemIncrements {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps 64 random bits to `[0, 1)` using the top 53 bits.
fn unit_interval(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}

impl IncrementSource for SystemIncrements {
    fn next_increment(&self, max: f64) -> f64 {
        let mut buf = [0u8; 8];
        match self.rng.fill(&mut buf) {
            Ok(()) => unit_interval(u64::from_le_bytes(buf)) * max,
            Err(_) => {
                tracing::warn!("system random source failed; using midpoint increment");
                max / 2.0
            }
        }
    }
}

/// Replays a fixed list of increments, then repeats `fallback`.
/// Values are clamped into `[0, max)`.
pub struct ScriptedIncrements {
    queue: Mutex<VecDeque<f64>>,
    fallback: f64,
}

impl ScriptedIncrements {
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            queue: Mutex::new(values.into_iter().collect()),
            fallback,
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([], value)
    }
}

impl IncrementSource for ScriptedIncrements {
    fn next_increment(&self, max: f64) -> f64 {
        let next = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(self.fallback);
        let below_max = if max > 0.0 { max - f64::EPSILON * max } else { 0.0 };
        next.clamp(0.0, below_max.max(0.0))
    }
}
