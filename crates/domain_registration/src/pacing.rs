//! Pacing between remote writes
//!
//! The record store accepts about three requests per second. Writes are
//! sequential, and a [`PacingPolicy`] decides how long to wait before each
//! write after the first. Stricter limiting can be swapped in without
//! touching the orchestrator.

use std::fmt::Debug;
use std::time::Duration;

/// Batch size above which the default policy starts pausing
pub const DEFAULT_THRESHOLD: usize = 3;

/// Pause applied between writes of a large batch
pub const DEFAULT_DELAY: Duration = Duration::from_millis(350);

/// Decides the pause before the next write
pub trait PacingPolicy: Debug + Send + Sync {
    /// Returns how long to wait before writing participant `index`
    /// (zero-based, always at least 1) of a batch of `total`
    fn wait_before_next(&self, index: usize, total: usize) -> Duration;
}

/// Fixed pause between writes once a batch exceeds a size threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelayPacing {
    /// Batches of this size or smaller are not paced
    pub threshold: usize,
    /// Pause between two writes
    pub delay: Duration,
}

impl FixedDelayPacing {
    pub fn new(threshold: usize, delay: Duration) -> Self {
        Self { threshold, delay }
    }
}

impl Default for FixedDelayPacing {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_DELAY)
    }
}

impl PacingPolicy for FixedDelayPacing {
    fn wait_before_next(&self, _index: usize, total: usize) -> Duration {
        if total > self.threshold {
            self.delay
        } else {
            Duration::ZERO
        }
    }
}

/// Never pauses
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl PacingPolicy for NoPacing {
    fn wait_before_next(&self, _index: usize, _total: usize) -> Duration {
        Duration::ZERO
    }
}
