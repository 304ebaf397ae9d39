//! Shared routing types and error definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building route tables.
///
/// Nothing here is produced at dispatch time: a request that matches no
/// route is handed to the router's `not_found` option instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A pre-compiled pattern contains a segment that cannot be routed.
    #[error("Malformed pattern {pattern}: {reason}")]
    MalformedPattern { pattern: String, reason: String },
}

/// Result type for route table construction.
pub type RouteResult<T> = Result<T, RouteError>;

/// Which capture name labels a parameter slot when two registrations
/// disagree about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamNaming {
    /// The most recently inserted name relabels the slot.
    #[default]
    Latest,
    /// The name registered first is kept.
    First,
}

impl ParamNaming {
    /// Pick the label for a slot currently named `current` when `incoming`
    /// is registered at the same position.
    pub fn resolve<'a>(self, current: &'a str, incoming: &'a str) -> &'a str {
        match self {
            ParamNaming::Latest => incoming,
            ParamNaming::First => current,
        }
    }
}

/// Parameter values captured while matching a path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Empty `Params`
    pub fn new() -> Self {
        Self::default()
    }

    /// Value captured under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Record a capture, replacing an earlier one under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Index<&str> for Params {
    type Output = str;

    fn index(&self, name: &str) -> &Self::Output {
        self.get(name)
            .unwrap_or_else(|| panic!("no parameter captured under {name:?}"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<It: IntoIterator<Item = (K, V)>>(iter: It) -> Self {
        Params(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}
