//! Event router service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ strip "/api/" ──▶ routing::Router ──▶ handler
//!                      (request id,                      (first match,       (echo)
//!                       trace, limits)                    uuid decode)
//!                           │                                  │
//!     ◀──────────────  response  ◀──────── 404 ◀── RouteNotFound
//! ```
//!
//! The route table is built once here and shared read-only with every request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use event_router::config::{load_config, ServiceConfig};
use event_router::http::echo::echo_event_routes;
use event_router::lifecycle::signals::wait_for_signal;
use event_router::observability::{logging, metrics};
use event_router::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "event-router")]
#[command(about = "Serves the events route table over HTTP", long_about = None)]
struct Args {
    /// TOML config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!("event-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        prefix = %config.routing.prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let routes = Arc::new(echo_event_routes()?);
    for route in routes.routes() {
        tracing::debug!(name = route.name(), pattern = %route.pattern(), "Route registered");
    }

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, routes);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.notified()));

    tokio::select! {
        result = &mut server_task => {
            // server ended on its own: nothing left to drain
            result??;
            return Ok(());
        }
        _ = wait_for_signal() => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    }

    match tokio::time::timeout(grace, server_task).await {
        Ok(result) => result??,
        Err(_) => tracing::warn!(
            grace_secs = grace.as_secs(),
            "Grace period elapsed with requests in flight"
        ),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
