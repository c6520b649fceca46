//! # Incapsula Domain
//!
//! Domain types for the Incapsula/Imperva management API client.
//!
//! This crate contains:
//! - The error taxonomy (`IncapsulaError`, `RequestContext`) and `Result`
//! - Structured diagnostics derived from errors
//! - Client configuration and defaults
//! - Response envelopes and endpoint DTOs
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O: everything here is data and validation

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::{ClientConfig, RetrySchedules};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use errors::{IncapsulaError, RequestContext, Result};
pub use types::*;
