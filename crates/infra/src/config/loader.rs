//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment when one exists
//! 2. Attempts to load from environment variables
//! 3. If the credentials are missing, falls back to loading from file
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `INCAPSULA_API_ID`: API id (required)
//! - `INCAPSULA_API_KEY`: API key (required)
//! - `INCAPSULA_BASE_URL`: legacy v1 base URL
//! - `INCAPSULA_BASE_URL_REV_2`: v2 base URL
//! - `INCAPSULA_BASE_URL_API`: base URL of the newer JSON APIs
//! - `INCAPSULA_TIMEOUT_SECONDS`: per-request timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./incapsula.json` or `./incapsula.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)

use std::path::{Path, PathBuf};

use incapsula_domain::{ClientConfig, IncapsulaError, Result};

pub const ENV_API_ID: &str = "INCAPSULA_API_ID";
pub const ENV_API_KEY: &str = "INCAPSULA_API_KEY";
pub const ENV_BASE_URL: &str = "INCAPSULA_BASE_URL";
pub const ENV_BASE_URL_REV_2: &str = "INCAPSULA_BASE_URL_REV_2";
pub const ENV_BASE_URL_API: &str = "INCAPSULA_BASE_URL_API";
pub const ENV_TIMEOUT_SECONDS: &str = "INCAPSULA_TIMEOUT_SECONDS";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the credentials are
/// missing, falls back to loading from a config file. The result is
/// validated either way.
///
/// # Errors
/// Returns `IncapsulaError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<ClientConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Could not load .env file"),
    }

    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `INCAPSULA_API_ID` and `INCAPSULA_API_KEY` must be present; every other
/// variable overrides a default.
///
/// # Errors
/// Returns `IncapsulaError::Config` if a required variable is missing or
/// the timeout is not a number.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var(ENV_API_ID)?, env_var(ENV_API_KEY)?);

    if let Some(value) = env_opt(ENV_BASE_URL) {
        config.base_url = value;
    }
    if let Some(value) = env_opt(ENV_BASE_URL_REV_2) {
        config.base_url_rev_2 = value;
    }
    if let Some(value) = env_opt(ENV_BASE_URL_API) {
        config.base_url_api = value;
    }
    if let Some(value) = env_opt(ENV_TIMEOUT_SECONDS) {
        config.timeout_seconds = value
            .parse::<u64>()
            .map_err(|e| IncapsulaError::Config(format!("Invalid timeout: {}", e)))?;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `IncapsulaError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(IncapsulaError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            IncapsulaError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| IncapsulaError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `IncapsulaError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| IncapsulaError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| IncapsulaError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(IncapsulaError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the working directory for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_in(&cwd)
}

fn probe_in(dir: &Path) -> Option<PathBuf> {
    ["incapsula.json", "incapsula.toml", "config.json", "config.toml"]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `IncapsulaError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        IncapsulaError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-blank environment variable, trimmed.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
