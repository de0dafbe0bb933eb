//! VoiceUp Web Server
//!
//! Axum-based REST API consumed by the analytics dashboard.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(routes::home::health))
        // Free-text classification
        .route(
            "/analyze",
            get(routes::analyze::usage).post(routes::analyze::analyze_text),
        )
        .route("/predict", post(routes::analyze::predict))
        // Conversations
        .route(
            "/conversations",
            get(routes::conversations::list_conversations)
                .post(routes::conversations::create_conversation),
        )
        .route("/conversations/{id}", get(routes::conversations::get_conversation))
        .route(
            "/conversations/{id}/messages",
            get(routes::conversations::list_messages),
        )
        .route(
            "/conversations/{id}/analyze",
            post(routes::conversations::analyze_conversation),
        )
        .route(
            "/conversations/{id}/analysis",
            get(routes::analysis::get_conversation_analysis),
        )
        // Messages and analyses
        .route("/messages/{id}", get(routes::messages::get_message))
        .route("/analysis/{id}", get(routes::analysis::get_analysis))
        // Aggregates
        .route("/analytics/emotions", get(routes::analytics::emotions))
        .route("/analytics/compliance", get(routes::analytics::compliance))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::home::index))
        .nest("/api", api_routes)
        .fallback(routes::home::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until the process is interrupted.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
