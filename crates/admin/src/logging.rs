#![forbid(unsafe_code)]

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) struct LogConfig {
    /// Default level for this workspace's crates when RUST_LOG is not set.
    pub(crate) level: Level,
    pub(crate) json: bool,
}

fn default_filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!("ts_admin={level},ts_storage={level}"))
}

/// Installs the global subscriber. Everything goes to stderr: stdout carries protocol responses.
pub(crate) fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config.level));
    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(true),
            )
            .try_init()?;
    }
    Ok(())
}
