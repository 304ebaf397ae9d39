//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! call arguments
//!     → options.rs (get_path → request path)
//!     → split into segments, same rules as patterns
//!     → trie candidates, most specific first (lazy)
//!     → for each handler: options.rs (add_params) → handler → outcome.rs
//!         - Continue: next handler, then next candidate
//!         - Stop(value): return value
//!     → exhausted: options.rs (not_found)
//! ```
//!
//! # Design Decisions
//! - Synchronous and sequential; a terminal value that is a future is
//!   returned as-is for the caller to drive
//! - Handler panics are not caught: a fault ends the request, it never
//!   falls through to the next candidate
//! - `not_found` runs at most once, and only after every handler declined

pub mod options;
pub mod outcome;

pub use options::{handler, url_path, Exchange, Handler, RouterOptions};
pub use outcome::{IntoOutcome, Outcome};

use crate::observability::metrics;
use crate::routing::pattern::split_path;
use crate::routing::trie::Trie;

/// Route `args` through the handlers `trie` offers for its path.
pub fn dispatch<A, I, T>(
    trie: &Trie<Handler<I, T>>,
    options: &RouterOptions<A, I, T>,
    args: A,
) -> T {
    let path = options.path_of(&args);
    let segments: Vec<&str> = split_path(&path).collect();

    let mut declined = 0usize;
    for candidate in trie.matches(&segments) {
        tracing::trace!(path = %path, params = %candidate.params(), "Trying candidate");
        for handler in candidate.values() {
            let input = options.handler_input(candidate.params().clone(), &args);
            match handler(input) {
                Outcome::Stop(value) => {
                    tracing::debug!(path = %path, declined, "Request handled");
                    metrics::record_dispatch("handled");
                    return value;
                }
                Outcome::Continue => {
                    declined += 1;
                    metrics::record_fallthrough();
                }
            }
        }
    }

    tracing::debug!(path = %path, declined, "No handler accepted request");
    metrics::record_dispatch("not_found");
    options.respond_not_found(args)
}
