//! HTTP request executor
//!
//! One authenticated call per [`ApiRequest`], no retries. Retrying is the
//! caller's decision and lives in `incapsula_common::resilience`.

pub mod client;
pub mod request;

pub use client::{Credentials, HttpClient, HttpClientBuilder, RawResponse};
pub use request::{ApiRequest, AuthStyle, RequestBody};
