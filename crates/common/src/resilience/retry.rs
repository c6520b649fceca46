//! Retry with a fixed backoff schedule
//!
//! ```text
//! Pending --success--------------------> Succeeded
//! Pending --failure, schedule left-----> Pending   (sleep next entry)
//! Pending --failure, schedule empty----> Exhausted (return last failure)
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::resilience::schedule::BackoffSchedule;
use crate::time::{Sleeper, TokioSleeper};

/// Terminal (or in-flight) state of a scheduled retry invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// Schedule not exhausted and no success yet.
    Pending,
    /// An attempt succeeded.
    Succeeded,
    /// Every attempt failed and the schedule is used up.
    Exhausted,
}

/// Outcome of a scheduled retry, including summary statistics.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    /// Value of the successful attempt, or the failure of the final attempt.
    pub result: Result<T, E>,
    pub state: RetryState,
    /// Attempts made, including the first.
    pub attempts: u32,
    /// Sum of the waits actually taken.
    pub total_delay: Duration,
}

impl<T, E> RetryOutcome<T, E> {
    /// Consume the outcome and return only the result.
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Runs an operation, retrying failures on a fixed [`BackoffSchedule`].
#[derive(Clone)]
pub struct ScheduledRetry {
    schedule: BackoffSchedule,
    sleeper: Arc<dyn Sleeper>,
}

impl fmt::Debug for ScheduledRetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledRetry")
            .field("schedule", &self.schedule)
            .field("sleeper", &self.sleeper)
            .finish()
    }
}

impl ScheduledRetry {
    /// Retry on `schedule`, waiting on the tokio timer.
    pub fn new(schedule: BackoffSchedule) -> Self {
        Self::with_sleeper(schedule, Arc::new(TokioSleeper))
    }

    /// Retry on `schedule`, waiting through the given sleeper.
    pub fn with_sleeper(schedule: BackoffSchedule, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { schedule, sleeper }
    }

    pub fn schedule(&self) -> &BackoffSchedule {
        &self.schedule
    }

    /// Execute `operation` and return only its final result.
    pub async fn execute<F, Fut, T, E>(&self, operation_name: &str, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        self.execute_with_outcome(operation_name, operation).await.into_result()
    }

    /// Execute `operation` and return the outcome with attempt statistics.
    pub async fn execute_with_outcome<F, Fut, T, E>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> RetryOutcome<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut remaining = self.schedule.delays().iter();
        let mut attempts: u32 = 0;
        let mut total_delay = Duration::ZERO;

        loop {
            attempts += 1;

            match operation().await {
                Ok(value) => {
                    if attempts > 1 {
                        debug!(
                            operation = operation_name,
                            attempts,
                            total_delay = ?total_delay,
                            "Operation succeeded after retries"
                        );
                    }
                    return RetryOutcome {
                        result: Ok(value),
                        state: RetryState::Succeeded,
                        attempts,
                        total_delay,
                    };
                }
                Err(err) => match remaining.next() {
                    Some(&delay) => {
                        warn!(
                            operation = operation_name,
                            attempt = attempts,
                            delay = ?delay,
                            error = %err,
                            "Operation failed, retrying after backoff"
                        );
                        self.sleeper.sleep(delay).await;
                        total_delay += delay;
                    }
                    None => {
                        error!(
                            operation = operation_name,
                            attempts,
                            total_delay = ?total_delay,
                            error = %err,
                            "All retry attempts failed"
                        );
                        return RetryOutcome {
                            result: Err(err),
                            state: RetryState::Exhausted,
                            attempts,
                            total_delay,
                        };
                    }
                },
            }
        }
    }
}
