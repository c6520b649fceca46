//! Sleeper test doubles
//!
//! Retry code waits through [`Sleeper`](crate::time::Sleeper). Handing it a
//! [`RecordingSleeper`] keeps tests fast and lets them assert on exactly which
//! delays were requested, in order.

// Test utility: poisoned mutexes should fail the test that caused them
#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::time::Sleeper;

/// Sleeper that records every requested delay and returns immediately.
///
/// Clones share the same record, so a test can keep one handle and pass
/// another to the code under test.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use incapsula_common::testing::RecordingSleeper;
/// use incapsula_common::Sleeper;
///
/// # tokio_test::block_on(async {
/// let sleeper = RecordingSleeper::new();
/// sleeper.sleep(Duration::from_secs(5)).await;
/// sleeper.sleep(Duration::from_secs(15)).await;
///
/// assert_eq!(sleeper.count(), 2);
/// assert_eq!(sleeper.total(), Duration::from_secs(20));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create a sleeper with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in call order.
    #[must_use]
    pub fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().expect("mutex poisoned").clone()
    }

    /// Number of sleeps requested so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.delays.lock().expect("mutex poisoned").len()
    }

    /// Sum of all requested delays.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.delays.lock().expect("mutex poisoned").iter().sum()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().expect("mutex poisoned").push(delay);
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for testing::time.
    use super::*;

    #[tokio::test]
    async fn clones_share_the_record() {
        let sleeper = RecordingSleeper::new();
        let handle = sleeper.clone();

        sleeper.sleep(Duration::from_secs(1)).await;
        handle.sleep(Duration::from_secs(2)).await;

        assert_eq!(sleeper.recorded(), vec![Duration::from_secs(1), Duration::from_secs(2)]);
        assert_eq!(handle.count(), 2);
    }

    #[test]
    fn empty_record_totals_zero() {
        let sleeper = RecordingSleeper::new();
        assert_eq!(sleeper.total(), Duration::ZERO);
        assert!(sleeper.recorded().is_empty());
    }
}
