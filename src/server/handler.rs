//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::domain::{ChatError, ChatMessage, User};

use super::state::AppState;

/// Body of `POST /chat/users`
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
}

/// Body of `POST /chat/messages`
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub sender: Option<String>,
    pub content: Option<String>,
}

/// Query parameters of `GET /chat/messages`
#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub since: Option<i64>,
}

/// Domain error on its way out of a handler.
///
/// Maps the taxonomy to HTTP status codes: BadInput -> 400,
/// Conflict -> 409, NotFound -> 404.
pub struct ApiError(ChatError);

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ChatError::BadInput(_) => StatusCode::BAD_REQUEST,
            ChatError::Conflict(_) => StatusCode::CONFLICT,
            ChatError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        tracing::debug!("Request rejected: {}", self.0);
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// `POST /chat/users` - register a new user
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.service.register(req.username).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /chat/users` - list all registered users
pub async fn get_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(state.service.list_users().await)
}

/// `PUT /chat/users/{username}/heartbeat` - refresh a user's liveness
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.service.heartbeat(&username).await?;
    Ok(Json(serde_json::json!({ "active": true })))
}

/// `DELETE /chat/users/{username}` - unregister a user (idempotent)
pub async fn remove_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Json<serde_json::Value> {
    state.service.unregister(&username).await;
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /chat/messages` - post a message to the room
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let message = state.service.post_message(req.sender, req.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /chat/messages?since=<ts>` - fetch messages newer than the cursor
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessagesQuery>,
) -> Json<Vec<ChatMessage>> {
    Json(state.service.fetch_messages(query.since).await)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
