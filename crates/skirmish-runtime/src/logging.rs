//! Structured logging setup
//!
//! All crates log through `tracing`; binaries call `init_tracing` once.
//! `RUST_LOG` overrides the configured level.

use serde::Deserialize;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Settings from the `[logging]` config table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. "info" or "skirmish_combat=debug"
    pub level: String,
    pub show_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_targets: true,
        }
    }
}

/// Install the global fmt subscriber. Later calls are no-ops.
pub fn init_tracing(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.show_targets)
            .try_init();
    });
}
