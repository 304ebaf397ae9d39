//! Injected dispatch behaviour.
//!
//! # Responsibilities
//! - Extract the path to route from the call arguments
//! - Combine captured params with the call arguments into handler input
//! - Produce the result when nothing handles a request
//!
//! # Design Decisions
//! - Options are shared closures, cloned into every composed router
//! - Defaults need only the small [`Exchange`] view of the call arguments

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::dispatch::outcome::{IntoOutcome, Outcome};
use crate::routing::types::Params;

/// A route handler: receives the composed input, decides the outcome.
pub type Handler<I, T> = Arc<dyn Fn(I) -> Outcome<T> + Send + Sync>;

/// Wrap a closure as a [`Handler`], adapting its return value.
pub fn handler<I, T, R, F>(f: F) -> Handler<I, T>
where
    F: Fn(I) -> R + Send + Sync + 'static,
    R: IntoOutcome<T>,
    I: 'static,
    T: 'static,
{
    Arc::new(move |input| f(input).into_outcome())
}

/// The view of the call arguments the default options rely on.
pub trait Exchange {
    /// Result of answering a request nobody handled.
    type Output;

    /// The request target, e.g. `/users/42?tab=posts` or an absolute URL.
    fn url(&self) -> &str;

    /// Mark the response not found and finish it.
    fn not_found(self) -> Self::Output;
}

type GetPath<A> = Arc<dyn Fn(&A) -> String + Send + Sync>;
type AddParams<A, I> = Arc<dyn Fn(Params, &A) -> I + Send + Sync>;
type NotFound<A, T> = Arc<dyn Fn(A) -> T + Send + Sync>;

/// How a router talks to the call arguments it is dispatched with.
///
/// `A` is the call argument type, `I` the handler input and `T` the
/// dispatch result.
pub struct RouterOptions<A, I, T> {
    get_path: GetPath<A>,
    add_params: AddParams<A, I>,
    not_found: NotFound<A, T>,
}

impl<A, I, T> Clone for RouterOptions<A, I, T> {
    fn clone(&self) -> Self {
        Self {
            get_path: Arc::clone(&self.get_path),
            add_params: Arc::clone(&self.add_params),
            not_found: Arc::clone(&self.not_found),
        }
    }
}

impl<A, I, T> fmt::Debug for RouterOptions<A, I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterOptions").finish_non_exhaustive()
    }
}

impl<A, I, T> RouterOptions<A, I, T> {
    pub fn new(
        get_path: impl Fn(&A) -> String + Send + Sync + 'static,
        add_params: impl Fn(Params, &A) -> I + Send + Sync + 'static,
        not_found: impl Fn(A) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            get_path: Arc::new(get_path),
            add_params: Arc::new(add_params),
            not_found: Arc::new(not_found),
        }
    }

    pub fn with_get_path(
        mut self,
        get_path: impl Fn(&A) -> String + Send + Sync + 'static,
    ) -> Self {
        self.get_path = Arc::new(get_path);
        self
    }

    /// Replace the param composition, possibly changing the handler input type.
    pub fn with_add_params<J>(
        self,
        add_params: impl Fn(Params, &A) -> J + Send + Sync + 'static,
    ) -> RouterOptions<A, J, T> {
        RouterOptions {
            get_path: self.get_path,
            add_params: Arc::new(add_params),
            not_found: self.not_found,
        }
    }

    pub fn with_not_found(mut self, not_found: impl Fn(A) -> T + Send + Sync + 'static) -> Self {
        self.not_found = Arc::new(not_found);
        self
    }

    pub(crate) fn path_of(&self, args: &A) -> String {
        (self.get_path)(args)
    }

    pub(crate) fn handler_input(&self, params: Params, args: &A) -> I {
        (self.add_params)(params, args)
    }

    pub(crate) fn respond_not_found(&self, args: A) -> T {
        (self.not_found)(args)
    }
}

impl<A> Default for RouterOptions<A, (A, Params), A::Output>
where
    A: Exchange + Clone + 'static,
{
    /// Route on the URL path, hand handlers `(args, params)` and defer
    /// misses to [`Exchange::not_found`].
    fn default() -> Self {
        Self::new(
            |args: &A| url_path(args.url()).to_string(),
            |params, args: &A| (args.clone(), params),
            A::not_found,
        )
    }
}

/// Path component of a request target, without query or fragment.
///
/// The path is taken verbatim: dot segments and percent escapes are left as
/// written, so `/a/../b` and `http://host/a/../b` give the same result.
pub fn url_path(target: &str) -> &str {
    match Url::parse(target) {
        Ok(url) if url.has_authority() => match strip_query(after_authority(target)) {
            "" => "/",
            path => path,
        },
        _ => strip_query(target),
    }
}

fn strip_query(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

/// Raw text of an absolute target from the end of its authority on.
fn after_authority(target: &str) -> &str {
    let hier = target.split_once(':').map_or(target, |(_, hier)| hier);
    let authority = hier.trim_start_matches(['/', '\\']);
    let end = authority.find(['/', '\\', '?', '#']).unwrap_or(authority.len());
    &authority[end..]
}
