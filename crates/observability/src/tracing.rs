//! Tracing/logging initialization.

use anyhow::Context;
use switchyard_core::{LogFormat, RouterConfig};
use tracing_subscriber::EnvFilter;

/// Filter used by [`init`] when the configured one cannot be parsed.
const FALLBACK_FILTER: &str = "info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). An invalid
/// `log_filter` falls back to `info` and is reported once the subscriber is up.
pub fn init(config: &RouterConfig) {
    match env_filter(config) {
        Ok(filter) => {
            let _ = install(config, filter);
        }
        Err(err) => {
            if install(config, EnvFilter::new(FALLBACK_FILTER)).is_ok() {
                ::tracing::warn!("{err:#}; falling back to '{FALLBACK_FILTER}'");
            }
        }
    }
}

/// Like [`init`], but reports whether a global subscriber was installed.
///
/// `RUST_LOG` takes precedence over `RouterConfig::log_filter`. An invalid
/// filter is an error here, and nothing is installed.
pub fn try_init(config: &RouterConfig) -> anyhow::Result<()> {
    let filter = env_filter(config)?;
    install(config, filter)
}

fn install(config: &RouterConfig, filter: EnvFilter) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let installed = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    installed
        .map_err(|e| anyhow::anyhow!(e))
        .context("a global tracing subscriber is already installed")
}

fn env_filter(config: &RouterConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("invalid log filter '{}'", config.log_filter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_reported() {
        // Only meaningful when RUST_LOG does not override the configured filter.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = RouterConfig {
            log_filter: "switchyard=loud".to_string(),
            ..RouterConfig::default()
        };
        assert!(env_filter(&config).is_err());
    }

    #[test]
    fn repeated_init_is_harmless() {
        let config = RouterConfig::default();
        init(&config);
        init(&config);
        assert!(try_init(&config).is_err());
    }
}
