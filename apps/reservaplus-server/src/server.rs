use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use reservaplus::{
    KeyValueStore, ReservaPlusConfig, Service, ServiceConfig, SystemClock, TokenVerifier,
    build_store, router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Build the service over an already-opened store.
#[must_use]
pub fn build_service(store: Arc<dyn KeyValueStore>, cfg: &ReservaPlusConfig) -> Arc<Service> {
    Arc::new(Service::new(
        store,
        Arc::new(SystemClock),
        ServiceConfig::from(cfg),
    ))
}

/// Module router plus the request-scoped middleware stack.
///
/// # Errors
/// Returns an error when the token verifier cannot be built from the auth section.
pub fn build_app(service: Arc<Service>, config: &AppConfig) -> anyhow::Result<Router> {
    let verifier = TokenVerifier::from_config(&config.auth)
        .context("invalid auth configuration")?
        .map(Arc::new);
    if verifier.is_none() {
        tracing::warn!("no token verification key configured; bearer tokens will be rejected");
    }

    // Last added runs first.
    Ok(router(service, verifier)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}

/// Open the store, bind the listener and serve until a shutdown signal.
///
/// # Errors
/// Returns an error if the store, the auth section or the listener cannot be set up.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let module_cfg = config.module_config();
    let store = build_store(&module_cfg.store)
        .await
        .context("failed to open data store")?;
    let service = build_service(store, &module_cfg);
    let app = build_app(service, &config)?;

    let listener = TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        backend = ?config.store.backend,
        "ReservaPlus server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!(error = %e, "signal handling failed");
            }
        })
        .await
        .context("server terminated with an error")?;

    tracing::info!("ReservaPlus server stopped");
    Ok(())
}

async fn wait_for_shutdown() -> anyhow::Result<()> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Received Ctrl+C signal");
        }
        result = wait_sigterm() => result?,
    }
    tracing::info!("Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

#[cfg(unix)]
async fn wait_sigterm() -> anyhow::Result<()> {
    let mut handler = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    handler.recv().await;
    tracing::info!("Received SIGTERM signal");
    Ok(())
}

#[cfg(not(unix))]
async fn wait_sigterm() -> anyhow::Result<()> {
    std::future::pending::<anyhow::Result<()>>().await
}
