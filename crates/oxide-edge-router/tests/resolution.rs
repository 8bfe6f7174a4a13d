//! Tests for first-match resolution order and condition semantics.

mod common;
use common::*;

use oxide_edge_router::{Conditions, Header, Method, Path, Router, host, referrer};

#[tokio::test]
async fn first_registered_match_wins() {
    let router = Router::new()
        .get("/articles", tag("first"))
        .unwrap()
        .get("/art.*", tag("second"))
        .unwrap()
        .all(tag("fallback"));

    let req = get("/articles");
    assert_eq!(resolved_index(&router, &req), Some(0));
    assert_eq!(resolved_tag(&router, &req).await.as_deref(), Some("first"));
}

#[tokio::test]
async fn later_route_wins_when_earlier_fails_one_condition() {
    let router = Router::new()
        .post("/articles", tag("post"))
        .unwrap()
        .get("/articles", tag("get"))
        .unwrap();

    assert_eq!(resolved_tag(&router, &get("/articles")).await.as_deref(), Some("get"));
}

#[tokio::test]
async fn articles_scenario_resolves_past_the_shorter_pattern() {
    let router = Router::new()
        .get(".*/articles", tag("h1"))
        .unwrap()
        .get(".*/articles/getBySlug", tag("h2"))
        .unwrap()
        .all(tag("h3"));

    assert_eq!(
        resolved_tag(&router, &get("/v1/articles/getBySlug")).await.as_deref(),
        Some("h2")
    );
    assert_eq!(resolved_tag(&router, &get("/v1/articles")).await.as_deref(), Some("h1"));
    assert_eq!(resolved_tag(&router, &get("/v1/other")).await.as_deref(), Some("h3"));
    assert_eq!(
        resolved_tag(&router, &request("POST", "/v1/articles")).await.as_deref(),
        Some("h3")
    );
}

#[test]
fn path_must_match_the_whole_path() {
    let router = Router::new().get("/articles", tag("exact")).unwrap();

    assert_eq!(resolved_index(&router, &get("/articles")), Some(0));
    assert_eq!(resolved_index(&router, &get("/articles/extra")), None);
    assert_eq!(resolved_index(&router, &get("/api/articles/x")), None);
    assert_eq!(resolved_index(&router, &get("/api/articles")), None);
}

#[test]
fn catch_all_matches_anything_even_unparseable_urls() {
    let router = Router::new().all(tag("any"));

    assert_eq!(resolved_index(&router, &request("DELETE", "/x")), Some(0));
    assert_eq!(
        resolved_index(&router, &oxide_edge_router::Request::new("BREW", "not a url")),
        Some(0)
    );
}

#[test]
fn catch_all_registered_first_shadows_everything() {
    let router = Router::new()
        .all(tag("any"))
        .get("/articles", tag("never"))
        .unwrap();

    assert_eq!(resolved_index(&router, &get("/articles")), Some(0));
}

#[test]
fn resolve_is_idempotent() {
    let router = Router::new()
        .get("/a", tag("a"))
        .unwrap()
        .get("/b", tag("b"))
        .unwrap();

    for path in ["/a", "/b", "/c"] {
        let req = get(path);
        assert_eq!(resolved_index(&router, &req), resolved_index(&router, &req));
    }
}

#[tokio::test]
async fn non_overlapping_routes_are_order_independent() {
    let forward = Router::new()
        .get("/a", tag("a"))
        .unwrap()
        .post("/b", tag("b"))
        .unwrap();
    let reversed = Router::new()
        .post("/b", tag("b"))
        .unwrap()
        .get("/a", tag("a"))
        .unwrap();

    for (method, path) in [("GET", "/a"), ("POST", "/b"), ("GET", "/b"), ("POST", "/a")] {
        let req = request(method, path);
        assert_eq!(
            resolved_tag(&forward, &req).await,
            resolved_tag(&reversed, &req).await,
            "{method} {path}"
        );
    }
}

#[test]
fn no_routes_resolves_nothing() {
    let router = Router::new();
    assert!(router.is_empty());
    assert_eq!(resolved_index(&router, &get("/")), None);
}

#[test]
fn method_comparison_ignores_case() {
    let router = Router::new().patch("/a", tag("patch")).unwrap();

    assert_eq!(resolved_index(&router, &request("patch", "/a")), Some(0));
    assert_eq!(resolved_index(&router, &request("PaTcH", "/a")), Some(0));
    assert_eq!(resolved_index(&router, &request("PUT", "/a")), None);
}

#[test]
fn every_verb_helper_registers_its_method() {
    let router = Router::new()
        .connect("/v", tag("connect"))
        .unwrap()
        .delete("/v", tag("delete"))
        .unwrap()
        .get("/v", tag("get"))
        .unwrap()
        .head("/v", tag("head"))
        .unwrap()
        .options("/v", tag("options"))
        .unwrap()
        .patch("/v", tag("patch"))
        .unwrap()
        .post("/v", tag("post"))
        .unwrap()
        .put("/v", tag("put"))
        .unwrap()
        .trace("/v", tag("trace"))
        .unwrap();

    let verbs = [
        "CONNECT", "DELETE", "GET", "HEAD", "OPTIONS", "PATCH", "POST", "PUT", "TRACE",
    ];
    for (index, verb) in verbs.iter().enumerate() {
        assert_eq!(resolved_index(&router, &request(verb, "/v")), Some(index), "{verb}");
    }
}

#[test]
fn handle_with_header_conditions() {
    let router = Router::new()
        .handle(
            Conditions::new()
                .and(Method::GET)
                .and(Header::new("x-api-version", "2")),
            tag("v2"),
        )
        .all(tag("v1"));

    let plain = get("/anything");
    assert_eq!(resolved_index(&router, &plain), Some(1));
    assert_eq!(
        resolved_index(&router, &plain.clone().header("x-api-version", "2")),
        Some(0)
    );
    assert_eq!(
        resolved_index(&router, &plain.header("x-api-version", "20")),
        Some(1)
    );
}

#[test]
fn host_condition_only_matches_lowercase_header_values() {
    let router = Router::new().handle(
        Conditions::new().and(host("Edge.Test")).and(Path::new("/.*").unwrap()),
        tag("host"),
    );

    assert_eq!(resolved_index(&router, &get("/x").header("host", "edge.test")), Some(0));
    assert_eq!(resolved_index(&router, &get("/x").header("host", "Edge.Test")), None);
    assert_eq!(resolved_index(&router, &get("/x")), None);
}

#[test]
fn referrer_condition() {
    let router = Router::new().handle(Conditions::new().and(referrer("blog.test")), tag("ref"));

    assert_eq!(
        resolved_index(&router, &get("/").header("referrer", "blog.test")),
        Some(0)
    );
    assert_eq!(
        resolved_index(&router, &get("/").header("referrer", "news.test")),
        None
    );
}
