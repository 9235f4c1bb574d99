//! End-to-end precedence behavior of trie lookups.

mod common;

use common::{exact_routes, matched, matched_with_query};
use route_trie::{build_trie, match_route, Route, RouteTable};

#[test]
fn test_specific_route_wins_over_wildcard_sibling() {
    let trie = build_trie(exact_routes(&["/jira/:x", "/jira/software"]));

    assert_eq!(matched(&trie, "/jira/software"), Some("/jira/software"));
    assert_eq!(matched(&trie, "/jira/core"), Some("/jira/:x"));

    let found = trie.match_route("/jira/core", None, None).unwrap();
    assert_eq!(found.matched.params["x"], "core");
}

#[test]
fn test_later_registration_overrides_earlier() {
    let routes = exact_routes(&["/issues/:id", "/issues/:key"]);
    let trie = build_trie(routes.clone());

    let found = trie.match_route("/issues/JRA-1", None, None).unwrap();
    assert_eq!(found.route.path, "/issues/:key");
    // params come from the winning template only
    assert_eq!(found.matched.params.len(), 1);
    assert_eq!(found.matched.params["key"], "JRA-1");

    // removing the override falls back to the earlier route
    let trie = build_trie(routes[..1].to_vec());
    let found = trie.match_route("/issues/JRA-1", None, None).unwrap();
    assert_eq!(found.route.path, "/issues/:id");
    assert_eq!(found.matched.params["id"], "JRA-1");
}

#[test]
fn test_specific_product_shadows_generic_product() {
    let with_override = build_trie(exact_routes(&["/jira/:x", "/jira/software"]));
    assert_eq!(matched(&with_override, "/jira/software"), Some("/jira/software"));

    let without = build_trie(exact_routes(&["/jira/:x"]));
    assert_eq!(matched(&without, "/jira/software"), Some("/jira/:x"));
}

#[test]
fn test_deeper_key_evaluated_before_shallower() {
    let trie = build_trie(vec![
        Route::new("/projects/settings/:tab").exact(),
        Route::new("/projects/:rest*"),
    ]);

    assert_eq!(
        matched(&trie, "/projects/settings/general"),
        Some("/projects/settings/:tab")
    );
    assert_eq!(matched(&trie, "/projects/JRA/board"), Some("/projects/:rest*"));
}

#[test]
fn test_empty_route_set_never_matches() {
    let trie = build_trie(Vec::new());

    for path in ["", "/", "/a", "/a/b/c"] {
        assert!(trie.match_route(path, None, None).is_none(), "{path}");
    }
}

#[test]
fn test_unmatched_paths_return_none() {
    let trie = build_trie(exact_routes(&["/a/b", "/a/:x/c"]));

    assert!(matched(&trie, "/b").is_none());
    assert!(matched(&trie, "/a/b/d").is_none());
    assert!(matched(&trie, "/a").is_none());
    assert_eq!(matched(&trie, "/a/z/c"), Some("/a/:x/c"));
}

#[test]
fn test_build_is_deterministic() {
    let routes = vec![
        Route::new("/"),
        Route::new("/:space/overview").exact(),
        Route::new("/wiki/:page+").exact(),
        Route::new("/wiki/home").exact(),
        Route::new("/wiki/:page").exact(),
    ];
    let first = build_trie(routes.clone());
    let second = build_trie(routes);

    for path in ["/", "/DEV/overview", "/wiki/home", "/wiki/a/b", "/wiki/c", "/x/y"] {
        assert_eq!(first.candidates(path, None), second.candidates(path, None), "{path}");
        assert_eq!(
            match_route(&first, path, None, None),
            match_route(&second, path, None, None),
            "{path}"
        );
    }
}

#[test]
fn test_query_requirement_selects_between_same_template() {
    let trie = build_trie(vec![
        Route::new("/search").exact().named("basic"),
        Route::new("/search").exact().named("advanced").with_query("jql"),
        Route::new("/search").exact().named("saved").with_query("filter=10001"),
    ]);

    assert_eq!(matched_with_query(&trie, "/search", ""), Some("basic"));
    assert_eq!(matched_with_query(&trie, "/search", "jql=text"), Some("advanced"));
    assert_eq!(matched_with_query(&trie, "/search", "filter=10001"), Some("saved"));
    assert_eq!(matched_with_query(&trie, "/search", "filter=42"), Some("basic"));
}

#[test]
fn test_table_applies_configured_base_path() {
    let config = route_trie::config::parse_config(
        r#"
base_path = "/jira"

[[routes]]
name = "issue"
path = "/browse/:key"
exact = true
"#,
    )
    .unwrap();
    let table = RouteTable::from_config(&config);
    let snapshot = table.snapshot();

    let found = snapshot.match_route("/jira/browse/JRA-7", None).unwrap();
    assert_eq!(found.route.label(), "issue");
    assert_eq!(found.matched.path, "/jira/browse/JRA-7");
    assert!(snapshot.match_route("/browse/JRA-7", None).is_none());
}
