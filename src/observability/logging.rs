//! Structured logging.
//!
//! # Responsibilities
//! - Initialize a `tracing` subscriber for processes embedding the router
//! - Resolve the log filter from environment, then configuration
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured filter
//! - Installing twice is not an error: the first subscriber stays

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::LoggingConfig;

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(config.ansi))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = %config.filter, "Logging initialized");
    }
    installed
}
