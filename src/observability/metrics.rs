//! Dispatch metrics.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): finished dispatches by `outcome`
//!   (`handled`, `not_found`)
//! - `router_fallthrough_total` (counter): handlers that declined a request
//! - `router_routes` (gauge): values in a router's trie, set when a router
//!   is built from a table and after every `add`; routers returned by
//!   `merge` and `mount` do not report

use ::metrics::{counter, gauge};

pub fn record_dispatch(outcome: &'static str) {
    counter!("router_dispatch_total", "outcome" => outcome).increment(1);
}

pub fn record_fallthrough() {
    counter!("router_fallthrough_total").increment(1);
}

pub fn record_route_count(count: usize) {
    gauge!("router_routes").set(count as f64);
}
