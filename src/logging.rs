//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

use crate::config::LoggingConfig;

/// Build the env filter: configured level as default, `RUST_LOG` on top
fn env_filter(level: &str) -> EnvFilter {
    let level = match level {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => "info",
    };

    EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        )
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default())
}

/// Install the global subscriber. Logs go to stderr so command output stays clean.
pub fn init(config: &LoggingConfig) {
    let filter = env_filter(&config.level);

    let result = if config.format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}
