//! Client constants
//!
//! Centralized location for upstream endpoints, header names and defaults.

// Upstream base URLs
pub const DEFAULT_BASE_URL: &str = "https://my.incapsula.com/api/prov/v1";
pub const DEFAULT_BASE_URL_REV_2: &str = "https://my.imperva.com/api/prov/v2";
pub const DEFAULT_BASE_URL_API: &str = "https://api.imperva.com";

// Authentication
pub const HEADER_API_ID: &str = "x-API-Id";
pub const HEADER_API_KEY: &str = "x-API-Key";
pub const PARAM_API_ID: &str = "api_id";
pub const PARAM_API_KEY: &str = "api_key";

// Account scoping on newer endpoints
pub const PARAM_ACCOUNT_ID: &str = "caid";

// HTTP client
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 180;
pub const USER_AGENT: &str = concat!("terraform-provider-incapsula/", env!("CARGO_PKG_VERSION"));

// Backoff schedules for eventually consistent endpoints (seconds)
pub const ATO_ALLOWLIST_BACKOFF_SECONDS: [u64; 4] = [5, 15, 30, 60];
pub const ATO_MITIGATION_BACKOFF_SECONDS: [u64; 3] = [5, 15, 30];
