//! Tracing initialisation
//!
//! The client only emits `tracing` events. Binaries and test harnesses that
//! want to see them call [`init_tracing`] once at startup.

use incapsula_domain::{IncapsulaError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Calling it again once a subscriber is installed is a no-op.
///
/// # Errors
/// Returns `IncapsulaError::Config` if `RUST_LOG` holds an invalid directive.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = build_env_filter()?;

    let layer = match format {
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(false).boxed(),
    };

    if let Err(e) = tracing_subscriber::registry().with(filter).with(layer).try_init() {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
    Ok(())
}

fn build_env_filter() -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .map_err(|e| IncapsulaError::Config(format!("Invalid RUST_LOG directive: {e}"))),
        _ => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing(LogFormat::Json).unwrap();
        init_tracing(LogFormat::Pretty).unwrap();
        tracing::info!("still logging after a second init");
    }
}
