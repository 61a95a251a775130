//! Server state shared across request handlers.

use crate::service::ChatService;

/// Shared application state
pub struct AppState {
    /// Request contract over the chat store
    pub service: ChatService,
}
