//! Integration tests for forward matching.
//!
//! Covers template dispatch (exact, placeholder, raw regex), method
//! filtering, registration-order precedence, variable merging and the
//! request-context plumbing.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use cadre_router::{
    Component, Extension, MatchError, Method, RequestContext, Route, RouteMap, Router,
    RouterConfig, Target, Vars,
};

fn owner(name: &str) -> Arc<dyn Extension> {
    Arc::new(Component::new(name))
}

fn route(path: &str, controller: &str, action: &str) -> Route {
    let target = Target::new(controller, action, Vars::new(), Vars::new());
    Route::new(owner("content"), &["GET"], path, target, Vars::new())
}

fn friendly() -> RouterConfig {
    RouterConfig {
        friendly_url: true,
        ..RouterConfig::default()
    }
}

fn router_with(routes: Vec<Route>, config: RouterConfig, request: &RequestContext) -> Router {
    let mut map = RouteMap::new();
    for r in routes {
        map.set(r);
    }
    Router::new(config, request, map)
}

#[test]
fn static_template_requires_exact_equality() {
    let mut request = RequestContext::new(Method::Get, "/about");
    let mut router = router_with(vec![route("about", "page", "about")], friendly(), &request);

    assert!(router.match_request(&mut request).is_ok());

    let mut request = RequestContext::new(Method::Get, "/about/us");
    assert!(matches!(
        router.match_request(&mut request),
        Err(MatchError::NotFound)
    ));
}

#[test]
fn static_template_ignores_surrounding_slashes() {
    let mut request = RequestContext::new(Method::Get, "/about/");
    let mut router = router_with(vec![route("about", "page", "about")], friendly(), &request);
    assert!(router.match_request(&mut request).is_ok());
}

#[test]
fn int_placeholder_binds_value() {
    let mut request = RequestContext::new(Method::Get, "/article/42");
    let mut router = router_with(
        vec![route("article/[int:id]", "article", "view")],
        friendly(),
        &request,
    );

    let matched = router.match_request(&mut request).unwrap();
    assert_eq!(matched.vars()["id"], "42");
}

#[test]
fn int_placeholder_rejects_non_digits() {
    let mut request = RequestContext::new(Method::Get, "/article/abc");
    let mut router = router_with(
        vec![route("article/[int:id]", "article", "view")],
        friendly(),
        &request,
    );
    assert!(matches!(
        router.match_request(&mut request),
        Err(MatchError::NotFound)
    ));
}

#[test]
fn optional_placeholder_matches_with_and_without_segment() {
    let routes = || vec![route("foo/[str:slug]?", "page", "foo")];

    let mut request = RequestContext::new(Method::Get, "/foo");
    let mut router = router_with(routes(), friendly(), &request);
    let matched = router.match_request(&mut request).unwrap();
    assert!(matched.vars().get("slug").is_none());

    let mut request = RequestContext::new(Method::Get, "/foo/bar");
    let mut router = router_with(routes(), friendly(), &request);
    let matched = router.match_request(&mut request).unwrap();
    assert_eq!(matched.vars()["slug"], "bar");
}

#[rstest]
#[case("rev/[h:hash]", "rev/DEADbeef", true)]
#[case("rev/[h:hash]", "rev/xyz", false)]
#[case("asset/[uuid4:id]", "asset/9f2c76c1-60e1-4f2b-8a5b-0123456789ab", true)]
#[case("asset/[uuid4:id]", "asset/not-a-uuid", false)]
#[case("tag/[str:slug]", "tag/long-form-title", true)]
#[case("tag/[str:slug]", "tag/with.dot", false)]
#[case("docs/[**:rest]", "docs/a/b/c", true)]
fn builtin_match_types(#[case] template: &str, #[case] path: &str, #[case] matches: bool) {
    let mut request = RequestContext::new(Method::Get, format!("/{path}"));
    let mut router = router_with(vec![route(template, "c", "a")], friendly(), &request);
    assert_eq!(router.match_request(&mut request).is_ok(), matches);
}

#[test]
fn raw_regex_template_matches_anchored() {
    let mut request = RequestContext::new(Method::Get, "/legacy/2024/03");
    let mut router = router_with(
        vec![route("@legacy/(?P<year>[0-9]{4})/.*", "archive", "month")],
        friendly(),
        &request,
    );

    let matched = router.match_request(&mut request).unwrap();
    assert_eq!(matched.vars()["year"], "2024");

    let mut request = RequestContext::new(Method::Get, "/x/legacy/2024/03");
    assert!(matches!(
        router.match_request(&mut request),
        Err(MatchError::NotFound)
    ));
}

#[test]
fn registration_order_is_the_priority_list() {
    // Both templates match "page/about"; the earlier registration wins.
    let mut request = RequestContext::new(Method::Get, "/page/about");
    let mut router = router_with(
        vec![
            route("page/[str:name]", "page", "dynamic"),
            route("page/about", "page", "static"),
        ],
        friendly(),
        &request,
    );

    let matched = router.match_request(&mut request).unwrap();
    assert_eq!(matched.target().action(), "dynamic");
}

#[test]
fn request_method_filters_candidates() {
    let target = Target::new("form", "submit", Vars::new(), Vars::new());
    let post_only = Route::new(owner("content"), &["POST"], "submit", target, Vars::new());

    let mut request = RequestContext::new(Method::Get, "/submit");
    let mut router = router_with(vec![post_only], friendly(), &request);
    assert!(matches!(
        router.match_request(&mut request),
        Err(MatchError::NotFound)
    ));
}

#[test]
fn query_parameters_override_path_captures() {
    let mut query = Vars::new();
    query.insert("id".into(), json!("99"));
    let mut request = RequestContext::new(Method::Get, "/article/42").with_query(query);

    let mut router = router_with(
        vec![route("article/[int:id]", "article", "view")],
        friendly(),
        &request,
    );

    let matched = router.match_request(&mut request).unwrap();
    assert_eq!(matched.vars()["id"], "99");
}

#[test]
fn route_defaults_survive_into_the_match() {
    let target = Target::new("article", "view", Vars::new(), Vars::new());
    let mut defaults = Vars::new();
    defaults.insert("layout".into(), json!("compact"));
    let with_defaults = Route::new(
        owner("content"),
        &["GET"],
        "article/[int:id]",
        target,
        defaults,
    );

    let mut request = RequestContext::new(Method::Get, "/article/7");
    let mut router = router_with(vec![with_defaults], friendly(), &request);

    let matched = router.match_request(&mut request).unwrap();
    assert_eq!(matched.vars()["layout"], "compact");
    assert_eq!(matched.vars()["id"], "7");
}

#[test]
fn matched_variables_are_reported_to_the_query_sink() {
    let mut request = RequestContext::new(Method::Get, "/article/42");
    let mut router = router_with(
        vec![route("article/[int:id]", "article", "view")],
        friendly(),
        &request,
    );

    router.match_request(&mut request).unwrap();
    assert_eq!(request.query()["id"], "42");
}

#[test]
fn current_is_recorded_after_a_match() {
    let mut request = RequestContext::new(Method::Get, "/about");
    let mut router = router_with(vec![route("about", "page", "about")], friendly(), &request);

    assert!(router.current().is_none());
    router.match_request(&mut request).unwrap();
    assert_eq!(router.current().unwrap().path(), "about");
}

#[test]
fn root_path_and_base_uri_are_stripped_before_matching() {
    let config = RouterConfig {
        friendly_url: true,
        root_path: "subdir".to_string(),
        base_uri: "v2".to_string(),
        ..RouterConfig::default()
    };

    let mut request = RequestContext::new(Method::Get, "/subdir/v2/article/42");
    let mut router = router_with(
        vec![route("article/[int:id]", "article", "view")],
        config,
        &request,
    );

    assert!(router.match_request(&mut request).is_ok());
}

#[test]
fn home_route_matches_the_root_request() {
    let target = Target::new("home", "index", Vars::new(), Vars::new());
    let mut home = Route::new(owner("content"), &["GET"], "/", target, Vars::new());
    home.set_home(true);

    let mut request = RequestContext::new(Method::Get, "/");
    let mut router = router_with(vec![home], friendly(), &request);

    let matched = router.match_request(&mut request).unwrap();
    assert_eq!(matched.target().controller(), "home");
    // The returned route is a clone; home status stays with the registration.
    assert!(!matched.is_home());
}

#[test]
fn non_friendly_mode_reads_the_route_query_key() {
    let mut query = Vars::new();
    query.insert("route".into(), json!("article/42"));
    let mut request = RequestContext::new(Method::Get, "/index.php").with_query(query);

    let mut router = router_with(
        vec![route("article/[int:id]", "article", "view")],
        RouterConfig::default(),
        &request,
    );

    let matched = router.match_request(&mut request).unwrap();
    assert_eq!(matched.vars()["id"], "42");
    // The reserved key is consumed, not echoed back as a variable.
    assert!(matched.vars().get("route").is_none());
}

#[test]
fn exhausted_map_is_not_found() {
    let mut request = RequestContext::new(Method::Get, "/nowhere");
    let mut router = router_with(
        vec![route("a", "c", "a"), route("b", "c", "b")],
        friendly(),
        &request,
    );
    assert!(matches!(
        router.match_request(&mut request),
        Err(MatchError::NotFound)
    ));
}
