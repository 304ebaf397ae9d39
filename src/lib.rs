//! Path router with a persistent parameter trie and fallthrough dispatch.
//!
//! Patterns are `/`-separated segments, each a literal or a `:name`
//! parameter. A request path is matched against every registered pattern,
//! most specific first, and offered to the handlers there in registration
//! order until one of them returns [`Outcome::Stop`]. If every handler
//! declines, the router's `not_found` option answers.
//!
//! ```
//! use boulevard::{Outcome, Params, RouteTable, Router, RouterOptions};
//!
//! let options = RouterOptions::new(
//!     |path: &String| path.clone(),
//!     |params, _: &String| params,
//!     |path: String| format!("{path} not found"),
//! );
//! let table = RouteTable::new()
//!     .route("/users/me", |_: Params| Outcome::<String>::Continue)
//!     .route("/users/:id", |params: Params| Some(format!("user {}", &params["id"])));
//! let router = Router::with_options(options, table).unwrap();
//!
//! assert_eq!(router.dispatch("/users/me".to_string()), "user me");
//! assert_eq!(router.dispatch("/posts".to_string()), "/posts not found");
//! ```

pub mod config;
pub mod dispatch;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use dispatch::{handler, Exchange, Handler, IntoOutcome, Outcome, RouterOptions};
pub use routing::{
    HandlerRegistry, ParamNaming, Params, Pattern, PatternPath, RouteError, RouteTable, Router,
    RouterSettings, Segment, Trie,
};
