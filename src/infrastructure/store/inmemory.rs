//! In-memory ChatStore implementation.
//!
//! Single source of truth for room membership and message history. One
//! mutex guards both collections so the compound operations (insert user +
//! join notice, remove user + leave notice) are atomic with respect to
//! every concurrent reader and writer.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    common::time::Clock,
    domain::{ChatError, ChatMessage, ChatStore, SYSTEM_SENDER, User, join_notice, leave_notice},
};

/// Registry and log, guarded together behind one lock.
struct RoomInner {
    users: HashMap<String, User>,
    messages: Vec<ChatMessage>,
}

impl RoomInner {
    fn append(&mut self, sender: String, content: String, now: i64) -> ChatMessage {
        // The wall clock may step backwards; the log must stay non-decreasing.
        let timestamp = self.messages.last().map_or(now, |m| now.max(m.timestamp));
        let message = ChatMessage {
            sender,
            content,
            timestamp,
        };
        self.messages.push(message.clone());
        message
    }

    fn append_system(&mut self, content: String, now: i64) {
        self.append(SYSTEM_SENDER.to_string(), content, now);
    }

    fn remove_user(&mut self, username: &str, now: i64) -> bool {
        if self.users.remove(username).is_some() {
            self.append_system(leave_notice(username), now);
            return true;
        }
        false
    }
}

/// In-memory chat room store.
///
/// Holds the user registry and the append-only message log for the lifetime
/// of the process. The clock is injected so tests can control time.
pub struct InMemoryChatStore {
    inner: Mutex<RoomInner>,
    clock: Arc<dyn Clock>,
}

impl InMemoryChatStore {
    /// Create an empty store using the given clock
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(RoomInner {
                users: HashMap::new(),
                messages: Vec::new(),
            }),
            clock,
        }
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn register_user(&self, username: &str) -> Result<User, ChatError> {
        let mut inner = self.inner.lock().await;
        if inner.users.contains_key(username) {
            return Err(ChatError::Conflict(username.to_string()));
        }
        let now = self.clock.now_millis();
        let user = User {
            username: username.to_string(),
            last_active_at: now,
        };
        inner.users.insert(username.to_string(), user.clone());
        inner.append_system(join_notice(username), now);
        Ok(user)
    }

    async fn touch_user(&self, username: &str) -> bool {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now_millis();
        match inner.users.get_mut(username) {
            Some(user) => {
                user.last_active_at = now;
                true
            }
            None => false,
        }
    }

    async fn remove_user(&self, username: &str) {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now_millis();
        inner.remove_user(username, now);
    }

    async fn post_message(&self, sender: &str, content: &str) -> Result<ChatMessage, ChatError> {
        // One critical section: the liveness refresh and the append may not
        // interleave with another writer.
        let mut inner = self.inner.lock().await;
        let now = self.clock.now_millis();
        match inner.users.get_mut(sender) {
            Some(user) => user.last_active_at = now,
            None => return Err(ChatError::NotFound(sender.to_string())),
        }
        Ok(inner.append(sender.to_string(), content.to_string(), now))
    }

    async fn messages_since(&self, since: i64) -> Vec<ChatMessage> {
        let inner = self.inner.lock().await;
        inner
            .messages
            .iter()
            .filter(|m| m.timestamp > since)
            .cloned()
            .collect()
    }

    async fn all_users(&self) -> Vec<User> {
        let inner = self.inner.lock().await;
        inner.users.values().cloned().collect()
    }

    async fn sweep_inactive(&self, max_idle: Duration) -> usize {
        let mut inner = self.inner.lock().await;
        let now = self.clock.now_millis();
        let max_idle_millis = max_idle.as_millis() as i64;
        let stale: Vec<String> = inner
            .users
            .values()
            .filter(|user| now - user.last_active_at > max_idle_millis)
            .map(|user| user.username.clone())
            .collect();
        for username in &stale {
            inner.remove_user(username, now);
        }
        stale.len()
    }
}
