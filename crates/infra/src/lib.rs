//! # Incapsula Infrastructure
//!
//! I/O side of the Incapsula/Imperva client.
//!
//! This crate contains:
//! - The HTTP request executor (`reqwest`)
//! - The response normalizer for status-only and envelope-encoded endpoints
//! - [`IncapsulaClient`] and its endpoint operations
//! - Configuration loading from environment and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Domain types and errors come from `incapsula-domain`
//! - Retry scheduling and sleepers come from `incapsula-common`

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{IncapsulaClient, IncapsulaClientBuilder};
pub use http::{ApiRequest, AuthStyle, Credentials, HttpClient, RawResponse, RequestBody};
pub use observability::{init_tracing, LogFormat};
