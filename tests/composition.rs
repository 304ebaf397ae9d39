//! Composing routers: add, merge and mount.

use boulevard::{Params, RouteTable, Router, RouterOptions};

mod common;
use common::{Call, CallRouter, Spy};

type Labels = Router<String, String, Params>;

fn options() -> RouterOptions<String, Params, String> {
    RouterOptions::new(
        |url: &String| url.clone(),
        |params, _: &String| params,
        |_| "404".to_string(),
    )
}

/// A table whose handlers answer with their label, or decline when the
/// label starts with `-`.
fn labelled(routes: &[(&str, &'static str)]) -> RouteTable<Params, String> {
    routes.iter().fold(RouteTable::new(), |table, &(pattern, label)| {
        table.route(pattern, move |_: Params| {
            if label.starts_with('-') {
                None
            } else {
                Some(label.to_string())
            }
        })
    })
}

#[test]
fn test_add_routes_to_router() {
    let foo = Spy::new();
    let bar = Spy::new();
    let router = CallRouter::new(vec![("/foo", foo.handler(true))]).unwrap();
    router.add(vec![("/bar", bar.handler(true))]).unwrap();

    router.dispatch(Call::new("/bar"));
    assert!(bar.called());

    router.dispatch(Call::new("/foo"));
    assert!(foo.called());
}

#[test]
fn test_added_handlers_follow_existing_at_same_node() {
    let routes = labelled(&[("/x", "-old"), ("/:p", "param")]);
    let router = Labels::with_options(options(), routes).unwrap();
    router.add(labelled(&[("/x", "new")])).unwrap();

    // the added handler joins the literal node, ahead of the older param route
    assert_eq!(router.dispatch("/x".into()), "new");

    let router = Labels::with_options(options(), labelled(&[("/x", "old")])).unwrap();
    router.add(labelled(&[("/x", "new")])).unwrap();
    assert_eq!(router.dispatch("/x".into()), "old");
}

#[test]
fn test_merge_joins_two_routers() {
    let foo = Spy::new();
    let bar = Spy::new();
    let r = CallRouter::new(vec![("/foo", foo.handler(true))]).unwrap();
    let s = CallRouter::new(vec![("/bar", bar.handler(true))]).unwrap();
    let t = r.merge(&s);

    t.dispatch(Call::new("/bar"));
    assert!(bar.called());

    t.dispatch(Call::new("/foo"));
    assert!(foo.called());
}

#[test]
fn test_merge_equals_concatenated_table() {
    let left: &[(&str, &'static str)] =
        &[("/a", "-a1"), ("/a/:id", "a-id"), ("/:x", "x"), ("/", "root")];
    let right: &[(&str, &'static str)] =
        &[("/a", "a2"), ("/b", "b"), ("/:y", "-y"), ("/a/new", "new")];

    let merged = Labels::with_options(options(), labelled(left))
        .unwrap()
        .merge(&Labels::with_options(options(), labelled(right)).unwrap());
    let single = Labels::with_options(options(), labelled(left).chain(labelled(right))).unwrap();

    for path in ["/", "/a", "/a/1", "/a/new", "/b", "/c", "/c/d", "/a/b/c"] {
        assert_eq!(
            merged.dispatch(path.into()),
            single.dispatch(path.into()),
            "diverged at {path}"
        );
    }
}

#[test]
fn test_mount_adds_router_at_subpath() {
    let foo = Spy::new();
    let bar = Spy::new();
    let r = CallRouter::new(vec![("/foo", foo.handler(true))]).unwrap();
    let s = CallRouter::new(vec![("/bar", bar.handler(true))]).unwrap();
    let t = r.mount("/baz", &s).unwrap();

    let call = Call::new("/bar");
    t.dispatch(call.clone());
    assert!(!bar.called());
    assert_eq!(call.response().status, Some(404));

    t.dispatch(Call::new("/baz/bar"));
    assert!(bar.called());

    t.dispatch(Call::new("/foo"));
    assert!(foo.called());
}

#[test]
fn test_mount_under_param_prefix() {
    let inner = Labels::with_options(
        options(),
        RouteTable::new().route("/settings", |params: Params| {
            Some(format!("settings for {}", &params["user"]))
        }),
    )
    .unwrap();
    let outer = Labels::with_options(options(), RouteTable::new()).unwrap();
    let combined = outer.mount("/users/:user", &inner).unwrap();

    assert_eq!(combined.dispatch("/users/ada/settings".into()), "settings for ada");
    assert_eq!(combined.dispatch("/settings".into()), "404");
}

#[test]
fn test_composition_leaves_sources_untouched() {
    let r = Labels::with_options(options(), labelled(&[("/r", "r")])).unwrap();
    let s = Labels::with_options(options(), labelled(&[("/s", "s")])).unwrap();
    let before = r.routes();

    let _ = r.merge(&s);
    let _ = r.mount("/sub", &s).unwrap();

    assert!(before.ptr_eq(&r.routes()));
    assert_eq!(r.dispatch("/s".into()), "404");
    assert_eq!(s.dispatch("/r".into()), "404");
}

#[test]
fn test_routes_listing_after_mount() {
    let routes = labelled(&[("/", "index"), ("/:id", "item")]);
    let inner = Labels::with_options(options(), routes).unwrap();
    let outer = Labels::with_options(options(), labelled(&[("/", "home")])).unwrap();
    let combined = outer.mount("/items", &inner).unwrap();

    let routes = combined.routes();
    let patterns: Vec<String> = routes.routes().into_iter().map(|(p, _)| p.to_string()).collect();
    assert_eq!(patterns, vec!["/", "/items", "/items/:id"]);
}
