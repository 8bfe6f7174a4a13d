//! Cross-origin policy shared by the router's OPTIONS and success paths.

use tracing::debug;

use crate::request::Request;
use crate::response::Response;

/// Header names a browser preflight carries.
const PREFLIGHT_HEADERS: [&str; 3] = [
    "Origin",
    "Access-Control-Request-Method",
    "Access-Control-Request-Headers",
];

/// Value of the `Allow` header on a bare OPTIONS answer.
pub const ALLOW: &str = "GET, HEAD, POST, OPTIONS";

/// The CORS header set attached to preflight and successful responses.
///
/// The default allows GET, HEAD, POST and OPTIONS from any origin and
/// accepts the `Content-Type` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    /// `Access-Control-Allow-Origin`
    pub allow_origin: String,
    /// `Access-Control-Allow-Methods`
    pub allow_methods: String,
    /// `Access-Control-Allow-Headers`
    pub allow_headers: String,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, HEAD, POST, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
        }
    }
}

impl CorsPolicy {
    /// Creates the default policy with a different allowed origin.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            allow_origin: origin.into(),
            ..Self::default()
        }
    }

    /// Returns the three `Access-Control-Allow-*` headers as name/value pairs.
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            ("Access-Control-Allow-Origin", self.allow_origin.as_str()),
            ("Access-Control-Allow-Methods", self.allow_methods.as_str()),
            ("Access-Control-Allow-Headers", self.allow_headers.as_str()),
        ]
    }

    /// Adds the CORS headers to a response.
    pub fn apply(&self, mut response: Response) -> Response {
        for (name, value) in self.headers() {
            response = response.header(name, value);
        }
        response
    }

    /// Returns true if the request carries every preflight header.
    pub fn is_preflight(req: &Request) -> bool {
        PREFLIGHT_HEADERS
            .iter()
            .all(|name| req.get_header(name).is_some())
    }

    /// Answers an OPTIONS request.
    ///
    /// A preflight gets the CORS headers; anything else gets a plain
    /// `Allow` header. Both bodies are empty.
    pub fn respond_options(&self, req: &Request) -> Response {
        if Self::is_preflight(req) {
            debug!(url = %req.url, "answering CORS preflight");
            self.apply(Response::ok())
        } else {
            debug!(url = %req.url, "answering bare OPTIONS");
            Response::ok().header("Allow", ALLOW)
        }
    }
}
