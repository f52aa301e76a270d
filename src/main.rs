#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]
// #![doc = include_str!("../README.md")]

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::Config;
use crate::refresh::refresh_all;
use crate::storage::Storage;
use crate::upstream::Upstream;

mod alerts;
mod aliases;
mod api;
mod config;
mod demo;
mod graceful_shutdown;
mod ingest;
mod leaks;
mod overview;
mod refresh;
mod root;
mod state;
mod stats;
mod storage;
#[cfg(test)]
mod tests;
mod upstream;
mod utils;
mod view;

const DEFAULT_RUST_LOG: &str = "canary=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let config = Config::from_env()?;
    let address = config.address;

    let app = setup_app(config).await?;

    let listener = TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// The dashboard is loaded before the router is handed out, an unreachable upstream loads the
/// demo data instead.
///
/// # Errors
///
/// Will return `Err` if the upstream client can not be created
pub async fn setup_app(config: Config) -> Result<Router> {
    let upstream = Upstream::new(config.upstream_url.clone(), config.upstream_timeout)?;
    let storage = Storage::new(config.page_size);

    refresh_all(&storage, &upstream, &config).await;

    Ok(create_router(storage, upstream, config))
}

/// Create the router for Canary
fn create_router(storage: Storage, upstream: Upstream, config: Config) -> Router {
    Router::new()
        .route("/", get(root::root))
        .nest("/api", router())
        .fallback(root::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
        .layer(Extension(upstream))
        .layer(Extension(config))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}
