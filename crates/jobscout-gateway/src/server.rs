//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use jobscout_core::JobscoutConfig;
use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::traits::{Embedder, Generator, TextExtractor, VectorStore};
use jobscout_jobs::OfferFinder;

/// Shared state for the gateway server.
///
/// The collaborator handles are constructed once at startup and never
/// replaced; concurrent requests share them freely.
#[derive(Clone)]
pub struct AppState {
    pub config: JobscoutConfig,
    pub embedder: Arc<dyn Embedder>,
    pub store: Arc<dyn VectorStore>,
    pub generator: Arc<dyn Generator>,
    pub extractor: Arc<dyn TextExtractor>,
    pub offers: Arc<dyn OfferFinder>,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(super::routes::root))
        .route("/health", get(super::routes::health))
        .route("/query", post(super::routes::query))
        .route("/search", post(super::routes::keyword_search))
        .route("/stats", get(super::routes::stats))
        .route("/upload-cv", post(super::routes::upload_cv))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until shutdown.
pub async fn start(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.gateway.host, state.config.gateway.port);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| JobscoutError::Config(format!("failed to bind {addr}: {e}")))?;
    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, router)
        .await
        .map_err(|e| JobscoutError::Http(format!("server error: {e}")))?;
    Ok(())
}
