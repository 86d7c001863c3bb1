use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ServerConfig;

/// Filter from `RUST_LOG` when set, else the configured log level.
pub fn env_filter(config: &ServerConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Initialize the tracing subscriber with structured logging.
///
/// Production logs are JSON lines; other environments get the
/// human-readable formatter.
pub fn init_tracing(config: &ServerConfig) {
    let json_format = config.is_production();

    if json_format {
        tracing_subscriber::registry()
            .with(env_filter(config))
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter(config))
            .with(fmt::layer().with_target(true))
            .init();
    }

    tracing::info!(
        port = config.port,
        environment = ?config.environment,
        json_format,
        "Tracing initialized"
    );
}
