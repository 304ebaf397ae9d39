//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation:
//!     RouteTable (patterns + handlers, in priority order)
//!     → pattern.rs (split, classify literal / :param)
//!     → trie.rs (insert, path-copying)
//!     → router.rs (published behind an ArcSwap)
//!
//! Incoming Request:
//!     → router.rs (snapshot current trie)
//!     → trie.rs (candidates, literal before param, depth first)
//!     → dispatch (fallthrough over candidates)
//! ```
//!
//! # Design Decisions
//! - Tries are immutable values; composition builds new ones
//! - Deterministic: same table and path always give the same candidates
//! - More specific routes first, earlier registrations first

pub mod pattern;
pub mod registry;
pub mod router;
pub mod table;
pub mod trie;
pub mod types;

pub use pattern::{compile, split_path, Pattern, PatternPath, Segment};
pub use registry::HandlerRegistry;
pub use router::{HandlerTrie, Router, RouterSettings};
pub use table::RouteTable;
pub use trie::{Candidate, Matches, Trie};
pub use types::{ParamNaming, Params, RouteError, RouteResult};
