pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::dashboard::Dashboard;
use crate::model::Artifacts;
use crate::pipeline::PipelineOptions;

/// Shared across handlers. Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<Artifacts>,
    pub dashboard: Option<Arc<Dashboard>>,
    pub options: PipelineOptions,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/predict-stress", post(routes::predict_stress))
        .route(routes::DASHBOARD_PATH, get(routes::dashboard))
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "stress-predictor v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
