use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::storage::SqliteStore;

pub mod page;
pub mod routes;

/// Server state. The one store connection lives here for the process lifetime.
pub struct AppState {
    pub store: Mutex<SqliteStore>,
    pub display_limit: usize,
}

impl AppState {
    pub fn new(store: SqliteStore, display_limit: usize) -> Self {
        Self {
            store: Mutex::new(store),
            display_limit,
        }
    }

    /// Hand the store back once no handler can reach it any more.
    pub fn into_store(self) -> SqliteStore {
        self.store.into_inner()
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/entries", get(routes::search).post(routes::upsert))
        .route("/api/entries/table", get(routes::search_table))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the web UI until Ctrl-C, then close the store.
pub async fn start_server(addr: SocketAddr, store: SqliteStore, display_limit: usize) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(store, display_limit));
    let app = build_router(state.clone());

    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match Arc::try_unwrap(state) {
        Ok(state) => state.into_store().close()?,
        Err(_) => tracing::warn!("Store still referenced after shutdown; leaving it to close on drop"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
