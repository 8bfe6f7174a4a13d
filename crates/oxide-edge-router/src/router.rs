//! Route registration and first-match resolution.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tracing::{debug, trace};

use crate::cors::CorsPolicy;
use crate::error::{BoxError, Result, RouterError};
use crate::predicate::{Conditions, Method, Path};
use crate::request::Request;
use crate::response::Response;

/// A type-erased async handler producing a JSON value.
pub type Handler =
    Arc<dyn Fn(Request) -> BoxFuture<'static, Result<serde_json::Value>> + Send + Sync>;

/// A condition set paired with the handler it guards.
pub struct Route {
    /// Conditions that must all hold for this route to be selected.
    pub conditions: Conditions,
    /// Request handler.
    pub handler: Handler,
}

impl Route {
    /// Creates a new route.
    ///
    /// The handler may resolve immediately or after suspending; either way
    /// its value is serialized only once it completes.
    pub fn new<F, Fut, T, E>(conditions: impl Into<Conditions>, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        Self {
            conditions: conditions.into(),
            handler: Arc::new(
                move |req: Request| -> BoxFuture<'static, Result<serde_json::Value>> {
                    let output = handler(req);
                    async move {
                        let value = output.await.map_err(|e| RouterError::Handler(e.into()))?;
                        serde_json::to_value(value).map_err(RouterError::from)
                    }
                    .boxed()
                },
            ),
        }
    }

    /// Returns true if the request satisfies this route's conditions.
    pub fn matches(&self, req: &Request) -> bool {
        self.conditions.matches(req)
    }

    /// Invokes the handler.
    pub fn call(&self, req: Request) -> BoxFuture<'static, Result<serde_json::Value>> {
        (self.handler)(req)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("conditions", &self.conditions)
            .finish_non_exhaustive()
    }
}

/// Dispatches requests to the first route whose conditions all hold.
///
/// Registration order is match priority: there is no specificity ranking,
/// so a catch-all registered with [`Router::all`] belongs at the end.
///
/// ```
/// # async fn run() -> oxide_edge_router::Result<()> {
/// use oxide_edge_router::{Request, Router};
///
/// let router = Router::new()
///     .get(".*/articles", |_req| async { Ok::<_, std::io::Error>(vec!["a", "b"]) })?
///     .all(|_req| async { Ok::<_, std::io::Error>("fallback") });
///
/// let res = router.route(&Request::get("https://api.test/v1/articles")).await?;
/// assert_eq!(res.body_string().as_deref(), Some(r#"["a","b"]"#));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Router {
    /// Registered routes, in priority order.
    routes: Vec<Route>,
    /// Headers for preflight and successful responses.
    cors: CorsPolicy,
}

impl Router {
    /// Creates a new empty router with the default CORS policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the CORS policy.
    #[must_use]
    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    /// Returns the CORS policy.
    pub const fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    /// Appends a route guarded by `conditions`.
    #[must_use]
    pub fn handle<F, Fut, T, E>(mut self, conditions: impl Into<Conditions>, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.routes.push(Route::new(conditions, handler));
        self
    }

    /// Appends a route matching every request that reaches it.
    #[must_use]
    pub fn all<F, Fut, T, E>(self, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.handle(Conditions::Empty, handler)
    }

    /// Adds a CONNECT route.
    pub fn connect<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::CONNECT, pattern, handler)
    }

    /// Adds a DELETE route.
    pub fn delete<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::DELETE, pattern, handler)
    }

    /// Adds a GET route.
    pub fn get<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::GET, pattern, handler)
    }

    /// Adds a HEAD route.
    pub fn head<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::HEAD, pattern, handler)
    }

    /// Adds an OPTIONS route.
    ///
    /// [`Router::route`] answers requests whose method is exactly `OPTIONS`
    /// itself; only differently cased tokens such as `options` get here.
    pub fn options<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::OPTIONS, pattern, handler)
    }

    /// Adds a PATCH route.
    pub fn patch<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::PATCH, pattern, handler)
    }

    /// Adds a POST route.
    pub fn post<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::POST, pattern, handler)
    }

    /// Adds a PUT route.
    pub fn put<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::PUT, pattern, handler)
    }

    /// Adds a TRACE route.
    pub fn trace<F, Fut, T, E>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.method(Method::TRACE, pattern, handler)
    }

    /// Adds a route for `method` whose full path matches `pattern`.
    pub fn method<F, Fut, T, E>(self, method: Method, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        let conditions = Conditions::new().and(method).and(Path::new(pattern)?);
        Ok(self.handle(conditions, handler))
    }

    /// Registered routes, in priority order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the first route, in registration order, whose conditions all
    /// hold for the request.
    pub fn resolve(&self, request: &Request) -> Option<&Route> {
        let found = self.routes.iter().enumerate().find(|&(index, route)| {
            let matched = route.matches(request);
            trace!(index, matched, "checked route");
            matched
        });

        match found {
            Some((index, route)) => {
                debug!(index, method = %request.method, url = %request.url, "route resolved");
                Some(route)
            }
            None => {
                debug!(method = %request.method, url = %request.url, "no route matched");
                None
            }
        }
    }

    /// Dispatches a request and builds its response.
    ///
    /// A request whose method is exactly `OPTIONS` is answered by the CORS
    /// policy and never reaches a registered route. Otherwise the resolved
    /// handler is awaited and its value sent as JSON with the CORS headers;
    /// with no route the response is a plain-text 404 without them.
    ///
    /// Handler and serialization failures are returned as errors, not
    /// turned into responses.
    pub async fn route(&self, request: &Request) -> Result<Response> {
        if request.method == "OPTIONS" {
            return Ok(self.cors.respond_options(request));
        }

        let Some(route) = self.resolve(request) else {
            return Ok(Response::not_found());
        };

        let value = route.call(request.clone()).await?;
        Ok(self.cors.apply(Response::json(&value)?))
    }
}
