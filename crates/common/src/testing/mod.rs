//! Testing utilities and helpers
//!
//! - **[`time`]**: deterministic stand-ins for the runtime sleeper
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use incapsula_common::testing::RecordingSleeper;
//! use incapsula_common::Sleeper;
//!
//! # tokio_test::block_on(async {
//! let sleeper = RecordingSleeper::new();
//! sleeper.sleep(Duration::from_secs(5)).await;
//! assert_eq!(sleeper.recorded(), vec![Duration::from_secs(5)]);
//! # });
//! ```

pub mod time;

pub use time::RecordingSleeper;
