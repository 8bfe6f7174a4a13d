//! Conversion between hyper messages and router messages.

use http::uri::PathAndQuery;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::ext::ReasonPhrase;
use hyper::header::HOST;
use hyper::{Request as HyperRequest, Response as HyperResponse, StatusCode};
use oxide_edge_router::{Request, Response, RouterError};
use thiserror::Error;

/// Errors raised while serving a single request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Reading the request body failed.
    #[error("failed to read request body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The router returned an error (a failing handler, typically).
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The router produced a response hyper cannot represent.
    #[error("invalid response: {0}")]
    Response(#[from] http::Error),
}

/// Converts a hyper request into a router request.
///
/// Server-side URIs only carry the path and query, so the absolute URL is
/// rebuilt from the `Host` header, or from `fallback_host` if it is absent.
pub async fn into_edge_request<B>(
    req: HyperRequest<B>,
    fallback_host: &str,
) -> Result<Request, TransportError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();

    let url = if parts.uri.scheme().is_some() {
        parts.uri.to_string()
    } else {
        let host = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(fallback_host);
        let path = parts.uri.path_and_query().map_or("/", PathAndQuery::as_str);
        format!("http://{host}{path}")
    };

    let mut edge = Request::new(parts.method.as_str(), url);

    // Repeated headers collapse into one comma-joined value, as Fetch
    // `Headers::get` reports them.
    for key in parts.headers.keys() {
        let joined = parts
            .headers
            .get_all(key)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect::<Vec<_>>()
            .join(", ");
        edge.headers.insert(key.to_string(), joined);
    }

    let bytes = body
        .collect()
        .await
        .map_err(|e| TransportError::Body(e.into()))?
        .to_bytes();
    edge.body = bytes.to_vec();

    Ok(edge)
}

/// Converts a router response into a hyper response.
pub fn into_hyper_response(res: Response) -> Result<HyperResponse<Full<Bytes>>, TransportError> {
    let status = StatusCode::from_u16(res.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HyperResponse::builder().status(status);

    if !res.status_text.is_empty() {
        if let Ok(reason) = ReasonPhrase::try_from(res.status_text.into_bytes()) {
            builder = builder.extension(reason);
        }
    }

    for (key, value) in &res.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    Ok(builder.body(Full::new(Bytes::from(res.body)))?)
}

/// The response sent when a request could not be served.
pub fn internal_server_error() -> HyperResponse<Full<Bytes>> {
    into_hyper_response(Response::internal_server_error()).unwrap_or_else(|_| {
        let mut res = HyperResponse::new(Full::new(Bytes::new()));
        *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        res
    })
}
