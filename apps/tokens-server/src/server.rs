use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use design_tokens::{Argon2Hasher, DesignTokensModule};
use tokens_auth::{JwtTokenService, TokenValidator};
use tokens_store::DocumentStore;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::{AppConfig, ServerConfig};
use crate::signals;

/// Serve until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if startup fails or the listener dies.
pub async fn run(config: &AppConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if let Err(e) = signals::wait_for_shutdown().await {
                tracing::error!(error = %e, "signal handling failed; shutting down");
            }
            cancel.cancel();
        }
    });
    serve(config, cancel).await
}

/// Wire the store, token service and module, then serve until `cancel` fires.
///
/// # Errors
/// Returns an error for invalid config, an unreachable store or a bind failure.
pub async fn serve(config: &AppConfig, cancel: CancellationToken) -> Result<()> {
    config.validate()?;

    let store = Arc::new(
        DocumentStore::connect(&config.store).context("failed to connect to the document store")?,
    );
    let tokens = Arc::new(JwtTokenService::new(&config.auth)?);
    let module = DesignTokensModule::new(&store, Arc::new(Argon2Hasher::default()), tokens.clone())
        .context("failed to initialize the design tokens module")?;
    let router = build_router(&module, tokens, &config.server);

    let listener = TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP server bound");

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully");
    };
    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await;

    store.disconnect();
    tracing::info!("document store disconnected");
    result.context("HTTP server failed")
}

/// Module routes plus the request timeout and HTTP tracing layers.
#[must_use]
pub fn build_router(
    module: &DesignTokensModule,
    validator: Arc<dyn TokenValidator>,
    server: &ServerConfig,
) -> Router {
    module
        .router(validator)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    status = Empty,
                )
            }),
        )
}
