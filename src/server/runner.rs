//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::service::ChatService;

use super::{
    handler::{
        get_messages, get_users, health_check, heartbeat, post_message, register_user, remove_user,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router with CORS and request tracing.
///
/// Exposed separately from [`run_server`] so tests can serve the router on
/// an ephemeral listener.
pub fn router(state: Arc<AppState>) -> Router {
    // Clients may be served from any origin. The request origin is mirrored
    // instead of using a literal wildcard so credentialed requests stay
    // allowed.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .allow_credentials(true);

    Router::new()
        .route("/chat/users", post(register_user).get(get_users))
        .route("/chat/users/{username}/heartbeat", put(heartbeat))
        .route("/chat/users/{username}", delete(remove_user))
        .route("/chat/messages", post(post_message).get(get_messages))
        .route("/chat/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the chat room REST server
///
/// # Arguments
///
/// * `service` - The request contract backing every endpoint
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 8081)
pub async fn run_server(
    service: ChatService,
    host: String,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState { service });
    let app = router(state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Chat room server listening on {}", listener.local_addr()?);
    tracing::info!("Endpoints:");
    tracing::info!("  * http://{}/chat/users (GET, POST)", bind_addr);
    tracing::info!("  * http://{}/chat/users/{{username}} (DELETE)", bind_addr);
    tracing::info!(
        "  * http://{}/chat/users/{{username}}/heartbeat (PUT)",
        bind_addr
    );
    tracing::info!("  * http://{}/chat/messages (GET, POST)", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    // Set up graceful shutdown signal handler
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
