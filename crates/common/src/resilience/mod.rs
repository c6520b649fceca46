//! Resilience patterns for eventually consistent endpoints
//!
//! Some upstream resources only become readable or writable a while after a
//! dependent resource is provisioned (an ATO allowlist right after its site
//! is created, for example). Those calls are wrapped in a
//! [`ScheduledRetry`]: the operation is attempted, and on failure the caller
//! waits the next entry of a fixed [`BackoffSchedule`] and tries again.
//!
//! No jitter, no growth beyond the schedule and no error classification:
//! every failure is retried until the schedule runs out, and the last
//! failure is returned.

pub mod retry;
pub mod schedule;

pub use retry::{RetryOutcome, RetryState, ScheduledRetry};
pub use schedule::BackoffSchedule;
