//! Storage interface of the chat room.
//!
//! The domain layer defines the data-access interface it needs; the
//! infrastructure layer provides the concrete implementation (dependency
//! inversion). The service layer and the sweeper only ever see this trait.

use std::time::Duration;

use async_trait::async_trait;

use super::{ChatError, ChatMessage, User};

/// Authoritative store of room membership and message history.
///
/// All operations are safe to invoke concurrently from arbitrarily many
/// callers. The compound operations (register + join notice, remove + leave
/// notice) must appear atomic to every concurrent reader.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Register a new user and append its join announcement.
    ///
    /// The existence check and the insertion are indivisible: of any number
    /// of concurrent registrations of the same name, at most one succeeds,
    /// the rest fail with [`ChatError::Conflict`].
    async fn register_user(&self, username: &str) -> Result<User, ChatError>;

    /// Refresh a user's liveness timestamp.
    ///
    /// Returns `false` if the username is unknown, which callers must treat
    /// as a not-found condition.
    async fn touch_user(&self, username: &str) -> bool;

    /// Remove a user and append its leave announcement.
    ///
    /// Removing an absent user is a no-op, not an error (idempotent delete).
    async fn remove_user(&self, username: &str);

    /// Append a message from a registered sender.
    ///
    /// Fails with [`ChatError::NotFound`] if the sender is unknown; a
    /// successful post also refreshes the sender's liveness.
    async fn post_message(&self, sender: &str, content: &str) -> Result<ChatMessage, ChatError>;

    /// All messages with `timestamp > since`, in append order.
    ///
    /// `since = 0` returns the full history.
    async fn messages_since(&self, since: i64) -> Vec<ChatMessage>;

    /// Snapshot of all registered users (order not significant)
    async fn all_users(&self) -> Vec<User>;

    /// Remove every user idle for longer than `max_idle` and return the
    /// number of evicted users. Each eviction appends a leave announcement.
    async fn sweep_inactive(&self, max_idle: Duration) -> usize;
}
