//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference registered handlers)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function over the parsed config

use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route {pattern} has no handler name")]
    MissingHandler { pattern: String },

    #[error("route {pattern} refers to unknown handler {handler}")]
    UnknownHandler { pattern: String, handler: String },
}

/// Checks that need nothing but the configuration itself.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = config
        .routes
        .iter()
        .filter(|route| route.handler.trim().is_empty())
        .map(|route| ValidationError::MissingHandler {
            pattern: route.pattern.clone(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Every route must name a handler `known` accepts.
pub fn validate_handlers(
    routes: &[RouteConfig],
    known: impl Fn(&str) -> bool,
) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = routes
        .iter()
        .filter(|route| !known(&route.handler))
        .map(|route| ValidationError::UnknownHandler {
            pattern: route.pattern.clone(),
            handler: route.handler.clone(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(pattern: &str, handler: &str) -> RouteConfig {
        RouteConfig {
            pattern: pattern.into(),
            handler: handler.into(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = RouterConfig {
            routes: vec![route("/", "home"), route("/:id", "show")],
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_handler_name() {
        let config = RouterConfig {
            routes: vec![route("/", ""), route("/ok", "ok")],
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MissingHandler { pattern: "/".into() }]
        );
    }

    #[test]
    fn test_unknown_handlers() {
        let routes = vec![route("/a", "a"), route("/b", "b")];
        let errors = validate_handlers(&routes, |name| name == "a").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "route /b refers to unknown handler b");
    }
}
