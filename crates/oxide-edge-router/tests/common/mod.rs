#![allow(dead_code)]

use std::convert::Infallible;
use std::future::{Ready, ready};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use oxide_edge_router::{Request, Response, Router};

pub const BASE: &str = "https://edge.test";

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

pub fn get(path: &str) -> Request {
    Request::get(url(path))
}

pub fn request(method: &str, path: &str) -> Request {
    Request::new(method, url(path))
}

/// A handler that answers with a fixed tag, so tests can tell routes apart.
pub fn tag(
    name: &'static str,
) -> impl Fn(Request) -> Ready<Result<&'static str, Infallible>> + Send + Sync + 'static {
    move |_req| ready(Ok(name))
}

/// A handler that counts its invocations.
pub fn counting(
    hits: &Arc<AtomicUsize>,
) -> impl Fn(Request) -> Ready<Result<&'static str, Infallible>> + Send + Sync + 'static {
    let hits = Arc::clone(hits);
    move |_req| {
        hits.fetch_add(1, Ordering::SeqCst);
        ready(Ok("counted"))
    }
}

pub async fn dispatch(router: &Router, req: &Request) -> Response {
    router
        .route(req)
        .await
        .unwrap_or_else(|e| panic!("Failed to route {} {}: {e}", req.method, req.url))
}

/// Routes the request and returns the JSON tag the handler produced.
pub async fn resolved_tag(router: &Router, req: &Request) -> Option<String> {
    let res = dispatch(router, req).await;
    if res.status == 404 {
        return None;
    }
    let value: serde_json::Value = serde_json::from_slice(&res.body)
        .unwrap_or_else(|e| panic!("Expected JSON body for {}: {e}", req.url));
    value.as_str().map(str::to_string)
}

/// Runs `resolve` and returns the index of the selected route.
pub fn resolved_index(router: &Router, req: &Request) -> Option<usize> {
    let route = router.resolve(req)?;
    router
        .routes()
        .iter()
        .position(|r| std::ptr::eq(r, route))
}
