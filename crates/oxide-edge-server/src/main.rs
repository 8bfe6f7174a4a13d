//! oxide-edge-server
//!
//! Hosts an `oxide-edge-router` route table behind an HTTP/1 listener.

mod articles;
mod transport;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request as HyperRequest, Response as HyperResponse};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use oxide_edge_router::{CorsPolicy, Router};

use crate::transport::{TransportError, into_edge_request, into_hyper_response};

/// Edge request router serving the article demo routes.
#[derive(Parser)]
#[command(name = "oxide-edge-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, env = "OXIDE_EDGE_BIND", default_value = "127.0.0.1:8787")]
    bind: SocketAddr,

    /// Value of `Access-Control-Allow-Origin` on CORS responses.
    #[arg(long, env = "OXIDE_EDGE_ALLOW_ORIGIN", default_value = "*")]
    allow_origin: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn build_router(allow_origin: &str) -> oxide_edge_router::Result<Router> {
    articles::register(Router::new().with_cors(CorsPolicy::with_origin(allow_origin)))
}

async fn serve(
    req: HyperRequest<Incoming>,
    router: &Router,
    fallback_host: &str,
) -> Result<HyperResponse<Full<Bytes>>, TransportError> {
    let request = into_edge_request(req, fallback_host).await?;
    let response = router.route(&request).await?;
    into_hyper_response(response)
}

async fn handle_request(
    req: HyperRequest<Incoming>,
    router: Arc<Router>,
    fallback_host: Arc<str>,
) -> Result<HyperResponse<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let uri = req.uri().clone();

    match serve(req, &router, &fallback_host).await {
        Ok(response) => Ok(response),
        Err(err) => {
            error!(%method, %uri, error = %err, "request failed");
            Ok(transport::internal_server_error())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let router = Arc::new(build_router(&cli.allow_origin)?);
    let fallback_host: Arc<str> = cli.bind.to_string().into();

    let listener = TcpListener::bind(cli.bind).await?;
    info!(addr = %cli.bind, routes = router.len(), "oxide-edge-server listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);
        let fallback_host = Arc::clone(&fallback_host);

        tokio::task::spawn(async move {
            let service = service_fn(move |req| {
                handle_request(req, Arc::clone(&router), Arc::clone(&fallback_host))
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                warn!(%peer, error = %err, "error serving connection");
            }
        });
    }
}
