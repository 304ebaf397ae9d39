//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::router::RouterSettings;
use crate::routing::types::ParamNaming;

/// Root configuration for a router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Which capture name labels a parameter slot on conflicts.
    pub param_naming: ParamNaming,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Route table, in priority order.
    pub routes: Vec<RouteConfig>,
}

impl RouterConfig {
    pub fn settings(&self) -> RouterSettings {
        RouterSettings {
            param_naming: self.param_naming,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,

    /// Colored output.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "boulevard=info".to_string(),
            ansi: true,
        }
    }
}

/// One route: a pattern and the name of the handler serving it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/users/:id`.
    pub pattern: String,

    /// Registered handler name.
    pub handler: String,
}
