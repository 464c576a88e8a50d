//! Logging and tracing setup

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the level filter; `RUST_LOG` wins over the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level: {}", config.level))
}

/// Initialize logging with the given configuration
///
/// Logs go to stderr so report tables printed on stdout stay clean.
pub fn initialize_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config)?;

    // Set up formatting layer based on format
    let fmt_layer = match config.format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        "compact" => fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .boxed(),
        _ => fmt::layer()
            .pretty()
            .with_target(false)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let config = LoggingConfig { level: level.to_string(), ..LoggingConfig::default() };
            assert!(build_filter(&config).is_ok(), "{}", level);
        }
    }
}
