//! Fixed backoff schedules

use std::time::Duration;

/// Ordered, fixed sequence of waits consumed one entry per failed attempt.
///
/// A schedule with `n` entries allows `n + 1` attempts in total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackoffSchedule {
    delays: Vec<Duration>,
}

impl BackoffSchedule {
    /// Build a schedule from explicit delays.
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Self {
        Self { delays: delays.into_iter().collect() }
    }

    /// Build a schedule from whole seconds, as stored in configuration.
    pub fn from_secs(secs: &[u64]) -> Self {
        Self::new(secs.iter().copied().map(Duration::from_secs))
    }

    /// A schedule with no waits: the operation runs exactly once.
    pub fn none() -> Self {
        Self::default()
    }

    /// The delays in the order they are consumed.
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Number of waits in the schedule.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Maximum number of attempts the schedule permits.
    pub fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }

    /// Sum of all waits; the time spent sleeping when every attempt fails.
    pub fn total(&self) -> Duration {
        self.delays.iter().sum()
    }
}

impl From<Vec<Duration>> for BackoffSchedule {
    fn from(delays: Vec<Duration>) -> Self {
        Self { delays }
    }
}
