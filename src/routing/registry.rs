//! Named handlers, for route tables declared in configuration.

use std::collections::HashMap;
use std::fmt;

use crate::config::loader::ConfigError;
use crate::config::schema::RouteConfig;
use crate::config::validation::{validate_handlers, ValidationError};
use crate::dispatch::options::{handler, Handler};
use crate::dispatch::outcome::IntoOutcome;
use crate::routing::table::RouteTable;

/// Handlers addressable by name.
pub struct HandlerRegistry<I, T> {
    handlers: HashMap<String, Handler<I, T>>,
}

impl<I, T> Default for HandlerRegistry<I, T> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<I, T> fmt::Debug for HandlerRegistry<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("HandlerRegistry").field("handlers", &names).finish()
    }
}

impl<I: 'static, T: 'static> HandlerRegistry<I, T> {
    pub fn register<R, F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(I) -> R + Send + Sync + 'static,
        R: IntoOutcome<T>,
    {
        self.with_handler(name, handler(f))
    }
}

impl<I, T> HandlerRegistry<I, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler under `name`, replacing any previous one.
    pub fn with_handler(mut self, name: impl Into<String>, handler: Handler<I, T>) -> Self {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            tracing::warn!(handler = %name, "Handler registered twice, keeping the latest");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Handler<I, T>> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Turn configured routes into a table, in declaration order.
    ///
    /// Every route naming an unknown handler is reported, not only the first.
    pub fn resolve(&self, routes: &[RouteConfig]) -> Result<RouteTable<I, T>, ConfigError> {
        validate_handlers(routes, |name| self.contains(name)).map_err(ConfigError::Validation)?;

        let mut table = RouteTable::new();
        for route in routes {
            let h = self
                .get(&route.handler)
                .ok_or_else(|| {
                    ConfigError::Validation(vec![ValidationError::UnknownHandler {
                        pattern: route.pattern.clone(),
                        handler: route.handler.clone(),
                    }])
                })?
                .clone();
            table.push(route.pattern.as_str(), h);
        }
        Ok(table)
    }
}
