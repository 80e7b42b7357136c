pub mod handlers;
pub mod render;

use crate::core::storyteller::StoryEngine;
use crate::core::TextGenerator;
use crate::utils::error::Result;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 所有請求共用、不可變的狀態
pub struct AppState<G: TextGenerator> {
    pub engine: StoryEngine<G>,
    pub app_url: Option<String>,
}

impl<G: TextGenerator> AppState<G> {
    pub fn new(engine: StoryEngine<G>, app_url: Option<String>) -> Self {
        Self { engine, app_url }
    }
}

pub fn router<G: TextGenerator + 'static>(state: Arc<AppState<G>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::index))
        .route("/scroll", post(handlers::scroll::<G>))
        .route("/api/scroll", post(handlers::api_scroll::<G>))
        .route("/download", post(handlers::download))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🏛️ ParsVerse listening on http://{}", addr);
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
