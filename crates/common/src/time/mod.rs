//! Time abstractions
//!
//! Waiting between retry attempts goes through the [`Sleeper`] trait so the
//! delay source can be swapped out. Production code uses [`TokioSleeper`];
//! tests use `testing::RecordingSleeper`, which records the requested delays
//! and returns immediately.

pub mod sleeper;

pub use sleeper::{Sleeper, TokioSleeper};
