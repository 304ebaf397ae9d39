//! The router: a swappable trie plus the options used to dispatch on it.
//!
//! # Responsibilities
//! - Compile route tables into the current trie
//! - Dispatch call arguments through it
//! - Compose routers (add, merge, mount)
//!
//! # Design Decisions
//! - The trie is immutable; the router only rebinds its `ArcSwap` cell
//! - Dispatch works on a snapshot, unaffected by concurrent `add` calls
//! - `add` goes through `rcu`, so concurrent additions are never lost
//! - Composition never changes a router that already exists

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::config::schema::RouterConfig;
use crate::dispatch::{self, Exchange, Handler, RouterOptions};
use crate::observability::metrics;
use crate::routing::pattern::{compile, split_path, Pattern};
use crate::routing::registry::HandlerRegistry;
use crate::routing::table::RouteTable;
use crate::routing::trie::{Candidate, Trie};
use crate::routing::types::{ParamNaming, Params, RouteResult};

/// Tunables that are plain data, unlike [`RouterOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouterSettings {
    pub param_naming: ParamNaming,
}

/// Trie of handlers taking `I` and producing `T`.
pub type HandlerTrie<I, T> = Trie<Handler<I, T>>;

/// A path router.
///
/// `A` is what the router is called with, `T` what a dispatch returns and
/// `I` what handlers receive (by default the call arguments followed by the
/// captured [`Params`]).
pub struct Router<A, T, I = (A, Params)> {
    trie: ArcSwap<HandlerTrie<I, T>>,
    options: RouterOptions<A, I, T>,
    settings: RouterSettings,
}

impl<A, T, I> fmt::Debug for Router<A, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("trie", &*self.trie.load())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<A> Router<A, <A as Exchange>::Output>
where
    A: Exchange + Clone + 'static,
{
    /// A router with the default options for [`Exchange`] call arguments.
    pub fn new(table: impl Into<RouteTable<(A, Params), A::Output>>) -> RouteResult<Self> {
        Self::with_options(RouterOptions::default(), table)
    }
}

impl<A, T, I> Router<A, T, I> {
    pub fn with_options(
        options: RouterOptions<A, I, T>,
        table: impl Into<RouteTable<I, T>>,
    ) -> RouteResult<Self> {
        Self::with_settings(options, RouterSettings::default(), table)
    }

    pub fn with_settings(
        options: RouterOptions<A, I, T>,
        settings: RouterSettings,
        table: impl Into<RouteTable<I, T>>,
    ) -> RouteResult<Self> {
        let table = table.into();
        let trie = table.to_trie(settings.param_naming)?;
        tracing::debug!(routes = table.len(), "Router built");
        metrics::record_route_count(trie.len());
        Ok(Self::from_trie(options, settings, trie))
    }

    /// Build from a configured route table, resolving handler names
    /// through `registry`.
    pub fn from_config(
        options: RouterOptions<A, I, T>,
        config: &RouterConfig,
        registry: &HandlerRegistry<I, T>,
    ) -> Result<Self, ConfigError> {
        let table = registry.resolve(&config.routes)?;
        Ok(Self::with_settings(options, config.settings(), table)?)
    }

    /// Wrap an existing trie.
    pub fn from_trie(
        options: RouterOptions<A, I, T>,
        settings: RouterSettings,
        trie: HandlerTrie<I, T>,
    ) -> Self {
        Self {
            trie: ArcSwap::from_pointee(trie),
            options,
            settings,
        }
    }

    /// Route `args` to the first handler that accepts them, or to the
    /// `not_found` option.
    pub fn dispatch(&self, args: A) -> T {
        let trie = self.trie.load_full();
        dispatch::dispatch(&trie, &self.options, args)
    }

    /// Register more routes behind the existing ones.
    pub fn add(&self, table: impl Into<RouteTable<I, T>>) -> RouteResult<()> {
        let table = table.into();
        let added = table.to_trie(self.settings.param_naming)?;
        let naming = self.settings.param_naming;

        self.trie.rcu(|current| current.merge_with(&added, naming));

        let total = self.trie.load().len();
        tracing::debug!(added = table.len(), total, "Routes added");
        metrics::record_route_count(total);
        Ok(())
    }

    /// A new router serving both route sets; on overlap `self` goes first.
    /// Options and settings come from `self`.
    pub fn merge<B>(&self, other: &Router<B, T, I>) -> Router<A, T, I> {
        let trie = self
            .trie
            .load()
            .merge_with(&other.trie.load(), self.settings.param_naming);
        tracing::debug!(routes = trie.len(), "Routers merged");
        Router::from_trie(self.options.clone(), self.settings, trie)
    }

    /// A new router that also serves every route of `other` under `prefix`.
    pub fn mount<B>(
        &self,
        prefix: impl Into<Pattern>,
        other: &Router<B, T, I>,
    ) -> RouteResult<Router<A, T, I>> {
        let prefix = compile(prefix)?;
        let mounted = other.trie.load().mount(&prefix);
        let trie = self.trie.load().merge_with(&mounted, self.settings.param_naming);
        tracing::debug!(prefix = %prefix, routes = trie.len(), "Router mounted");
        Ok(Router::from_trie(self.options.clone(), self.settings, trie))
    }

    /// Snapshot of the current trie.
    pub fn routes(&self) -> Arc<HandlerTrie<I, T>> {
        self.trie.load_full()
    }

    /// Candidates `path` would be offered to, most specific first.
    pub fn candidates(&self, path: &str) -> Vec<Params> {
        let segments: Vec<&str> = split_path(path).collect();
        let trie = self.trie.load();
        trie.matches(&segments).map(Candidate::into_params).collect()
    }

    pub fn options(&self) -> &RouterOptions<A, I, T> {
        &self.options
    }

    pub fn settings(&self) -> RouterSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Outcome;
    use crate::observability::metrics::testing::GaugeRecorder;

    type Plain = Router<&'static str, String, Params>;

    fn options() -> RouterOptions<&'static str, Params, String> {
        RouterOptions::new(
            |path: &&'static str| path.to_string(),
            |params, _: &&'static str| params,
            |path: &'static str| format!("not found: {path}"),
        )
    }

    fn table(routes: &[(&'static str, &'static str)]) -> RouteTable<Params, String> {
        routes.iter().fold(RouteTable::new(), |table, &(pattern, body)| {
            table.route(pattern, move |_| Some(body.to_string()))
        })
    }

    #[test]
    fn test_add_keeps_existing_priority() {
        let router = Plain::with_options(options(), table(&[("/foo", "old")])).unwrap();
        router.add(table(&[("/foo", "new"), ("/bar", "bar")])).unwrap();

        assert_eq!(router.dispatch("/foo"), "old");
        assert_eq!(router.dispatch("/bar"), "bar");
        assert_eq!(router.routes().len(), 3);
    }

    #[test]
    fn test_snapshot_survives_add() {
        let router = Plain::with_options(options(), table(&[("/a", "a")])).unwrap();
        let before = router.routes();
        router.add(table(&[("/b", "b")])).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(router.routes().len(), 2);
        assert!(!before.ptr_eq(&router.routes()));
    }

    #[test]
    fn test_merge_leaves_inputs_alone() {
        let a = Plain::with_options(options(), table(&[("/a", "a")])).unwrap();
        let b = Plain::with_options(options(), table(&[("/b", "b")])).unwrap();
        let merged = a.merge(&b);

        assert_eq!(merged.dispatch("/a"), "a");
        assert_eq!(merged.dispatch("/b"), "b");
        assert_eq!(a.dispatch("/b"), "not found: /b");
        assert_eq!(b.dispatch("/a"), "not found: /a");
    }

    #[test]
    fn test_mount_requires_prefix() {
        let outer = Plain::with_options(options(), table(&[("/foo", "foo")])).unwrap();
        let inner = Plain::with_options(options(), table(&[("/bar", "bar")])).unwrap();
        let combined = outer.mount("/baz", &inner).unwrap();

        assert_eq!(combined.dispatch("/foo"), "foo");
        assert_eq!(combined.dispatch("/baz/bar"), "bar");
        assert_eq!(combined.dispatch("/bar"), "not found: /bar");
    }

    #[test]
    fn test_candidates_in_precedence_order() {
        let routes = table(&[("/:id", "p"), ("/me", "me")]);
        let router = Plain::with_options(options(), routes).unwrap();
        let candidates = router.candidates("/me");

        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].is_empty());
        assert_eq!(candidates[1].get("id"), Some("me"));
    }

    #[test]
    fn test_first_param_name_setting() {
        let settings = RouterSettings {
            param_naming: ParamNaming::First,
        };
        let table = RouteTable::new()
            .route("/:id", |params: Params| -> Outcome<String> {
                Outcome::Stop(params.get("id").unwrap_or("-").to_string())
            })
            .route("/:slug", |_: Params| None::<String>);
        let router = Plain::with_settings(options(), settings, table).unwrap();

        assert_eq!(router.dispatch("/42"), "42");
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let router = Arc::new(Plain::with_options(options(), RouteTable::new()).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let router = router.clone();
                std::thread::spawn(move || {
                    let pattern = format!("/r{i}");
                    let table =
                        RouteTable::new().route(pattern, |_: Params| Some(String::from("ok")));
                    router.add(table).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(router.routes().len(), 8);
        assert_eq!(router.dispatch("/r7"), "ok");
    }

    #[test]
    fn test_route_gauge_skips_composed_routers() {
        let recorder = GaugeRecorder::new("router_routes");
        ::metrics::with_local_recorder(&recorder, || {
            let router = Plain::with_options(options(), table(&[("/a", "a")])).unwrap();
            let other = Plain::with_options(options(), table(&[("/b", "b"), ("/c", "c")])).unwrap();
            let _ = router.merge(&other);
            let _ = router.mount("/m", &other).unwrap();
            router.add(table(&[("/d", "d")])).unwrap();
        });

        assert_eq!(recorder.values(), vec![1.0, 2.0, 2.0]);
    }
}
