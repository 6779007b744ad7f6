//! # scenepadd: scenepad daemon
//!
//! Composition root that wires the core and the adapters together and
//! starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing` from the configured filter
//! - Construct the light store, scene engine, dispatcher and press service
//! - Construct the HTTP action notifier when an endpoint is configured
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C), cancelling scene runs in flight
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use scenepad_adapter_http_axum::state::AppState;
use scenepad_adapter_notify_http::HttpActionNotifier;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Remote notification
    let notifier = HttpActionNotifier::from_config(&config.notify)?;
    match &notifier {
        Some(notifier) => tracing::info!(endpoint = %notifier.endpoint(), "forwarding actions"),
        None => tracing::info!("action forwarding disabled"),
    }

    // Core
    let catalog = config.catalog();
    tracing::info!(
        buttons = catalog.buttons.len(),
        lights = catalog.lights.len(),
        scenes = catalog.scenes.len(),
        overlap = ?config.scenes.overlap,
        "catalog loaded"
    );
    let (state, press_service) = AppState::build(
        catalog,
        config.bindings(),
        notifier,
        config.timing.timings(),
        config.scenes.overlap,
    );
    let engine = Arc::clone(state.dispatcher.engine());
    let press_task = tokio::spawn(press_service.run());

    // HTTP
    let app = scenepad_adapter_http_axum::router::build(state);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "scenepadd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let cancelled = engine.cancel_all();
    press_task.abort();
    tracing::info!(cancelled, "scenepadd stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
