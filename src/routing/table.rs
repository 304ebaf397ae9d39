//! Route tables: ordered pattern/handler registrations.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::dispatch::options::{handler, Handler};
use crate::dispatch::outcome::IntoOutcome;
use crate::routing::pattern::{compile, Pattern, PatternPath};
use crate::routing::trie::Trie;
use crate::routing::types::{ParamNaming, RouteResult};

/// An ordered list of `(pattern, handler)` registrations.
///
/// The same pattern may appear any number of times; handlers registered
/// earlier are tried first, later ones act as their fallbacks.
pub struct RouteTable<I, T> {
    entries: Vec<(Pattern, Handler<I, T>)>,
}

impl<I, T> Default for RouteTable<I, T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<I, T> Clone for RouteTable<I, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<I, T> fmt::Debug for RouteTable<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(pattern, _)| pattern))
            .finish()
    }
}

impl<I: 'static, T: 'static> RouteTable<I, T> {
    /// Register a closure; its return value is adapted through [`IntoOutcome`].
    pub fn route<R, F>(self, pattern: impl Into<Pattern>, f: F) -> Self
    where
        F: Fn(I) -> R + Send + Sync + 'static,
        R: IntoOutcome<T>,
    {
        self.handler(pattern, handler(f))
    }
}

impl<I, T> RouteTable<I, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already built handler.
    pub fn handler(mut self, pattern: impl Into<Pattern>, handler: Handler<I, T>) -> Self {
        self.push(pattern, handler);
        self
    }

    pub fn push(&mut self, pattern: impl Into<Pattern>, handler: Handler<I, T>) {
        self.entries.push((pattern.into(), handler));
    }

    /// This table followed by every registration of `other`.
    pub fn chain(mut self, other: RouteTable<I, T>) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile every pattern, failing on the first malformed one.
    pub fn compile(&self) -> RouteResult<Vec<(PatternPath, Handler<I, T>)>> {
        self.entries
            .iter()
            .map(|(pattern, h)| Ok((compile(pattern.clone())?, h.clone())))
            .collect()
    }

    /// Build a trie holding every handler, in registration order.
    pub fn to_trie(&self, naming: ParamNaming) -> RouteResult<Trie<Handler<I, T>>> {
        let compiled = self.compile()?;
        Ok(compiled
            .into_iter()
            .fold(Trie::new(), |trie, (path, h)| trie.insert_with(&path, h, naming)))
    }
}

impl<I, T, P: Into<Pattern>> FromIterator<(P, Handler<I, T>)> for RouteTable<I, T> {
    fn from_iter<It: IntoIterator<Item = (P, Handler<I, T>)>>(iter: It) -> Self {
        let mut table = RouteTable::new();
        table.extend(iter);
        table
    }
}

impl<I, T, P: Into<Pattern>> Extend<(P, Handler<I, T>)> for RouteTable<I, T> {
    fn extend<It: IntoIterator<Item = (P, Handler<I, T>)>>(&mut self, iter: It) {
        for (pattern, h) in iter {
            self.push(pattern, h);
        }
    }
}

impl<I, T, P: Into<Pattern>> From<Vec<(P, Handler<I, T>)>> for RouteTable<I, T> {
    fn from(pairs: Vec<(P, Handler<I, T>)>) -> Self {
        pairs.into_iter().collect()
    }
}

/// Keys are visited in order, so the table is deterministic.
impl<I, T, P: Into<Pattern>> From<BTreeMap<P, Handler<I, T>>> for RouteTable<I, T> {
    fn from(map: BTreeMap<P, Handler<I, T>>) -> Self {
        map.into_iter().collect()
    }
}

/// Distinct keys that normalize to the same pattern (`/foo` and `foo/`)
/// end up in unspecified relative order.
impl<I, T, P: Into<Pattern>> From<HashMap<P, Handler<I, T>>> for RouteTable<I, T> {
    fn from(map: HashMap<P, Handler<I, T>>) -> Self {
        map.into_iter().collect()
    }
}
