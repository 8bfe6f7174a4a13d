//! # oxide-edge-router
//!
//! Request dispatch for edge functions.
//!
//! This crate provides:
//! - Composable request predicates (method, header, host, referrer, path)
//! - First-match-wins resolution over routes in registration order
//! - Built-in CORS preflight handling ahead of any registered route
//! - JSON serialization of handler results
//!
//! ## Quick Start
//!
//! ```ignore
//! use oxide_edge_router::{Request, Router};
//!
//! let router = Router::new()
//!     .get(".*/articles", list_articles)?
//!     .get(".*/articles/getBySlug", article_by_slug)?
//!     .all(fallback);
//!
//! let response = router.route(&request).await?;
//! ```
//!
//! ## Conditions
//!
//! Verb helpers combine [`Method`] and [`Path`]. Anything else goes through
//! [`Router::handle`]:
//!
//! ```ignore
//! use oxide_edge_router::{Conditions, Header, Method, host};
//!
//! let router = Router::new().handle(
//!     Conditions::new()
//!         .and(Method::POST)
//!         .and(host("api.example.com"))
//!         .and(Header::new("x-api-version", "2")),
//!     create_article,
//! );
//! ```
//!
//! Path patterns are regular expressions that must cover the whole path:
//! `.*/articles` matches `/v1/articles` but not `/v1/articles/getBySlug`.
//!
//! ## CORS
//!
//! Requests with method `OPTIONS` never reach a handler. A preflight (with
//! `Origin`, `Access-Control-Request-Method` and
//! `Access-Control-Request-Headers`) is answered with the [`CorsPolicy`]
//! headers, any other OPTIONS request with an `Allow` header. Successful
//! responses carry the CORS headers too; the 404 response does not.

mod cors;
mod error;
mod predicate;
mod request;
mod response;
mod router;

pub use cors::{ALLOW, CorsPolicy};
pub use error::{BoxError, Result, RouterError};
pub use predicate::{Conditions, Header, Method, Path, Predicate, host, referrer};
pub use request::Request;
pub use response::Response;
pub use router::{Handler, Route, Router};
