//! Request-handling contract of the chat room.
//!
//! Validates inbound requests, translates them into store operations and
//! defines which failures each operation may surface. The HTTP shell and
//! any other transport bind to this contract, never to the store directly.

use std::sync::Arc;

use crate::domain::{ChatError, ChatMessage, ChatStore, User};

/// Translates external requests into [`ChatStore`] calls.
///
/// Body fields arrive as `Option<String>` so that a missing key and an
/// empty value are both reported as [`ChatError::BadInput`] instead of a
/// framework-level rejection.
#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn ChatStore>,
}

impl ChatService {
    /// Create a new service on top of the given store
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Fails with `BadInput` if the username is missing or empty, with
    /// `Conflict` if it is already taken.
    pub async fn register(&self, username: Option<String>) -> Result<User, ChatError> {
        let username = required_field(username, "username")?;
        let user = self.store.register_user(&username).await?;
        tracing::info!("User '{}' registered", user.username);
        Ok(user)
    }

    /// Snapshot of all registered users. Never fails.
    pub async fn list_users(&self) -> Vec<User> {
        self.store.all_users().await
    }

    /// Refresh a user's liveness. Fails with `NotFound` for unknown users.
    pub async fn heartbeat(&self, username: &str) -> Result<(), ChatError> {
        if self.store.touch_user(username).await {
            Ok(())
        } else {
            Err(ChatError::NotFound(username.to_string()))
        }
    }

    /// Remove a user from the room.
    ///
    /// Idempotent by contract: an absent user is a successful no-op, unlike
    /// heartbeat which reports `NotFound`. The asymmetry is intentional.
    pub async fn unregister(&self, username: &str) {
        self.store.remove_user(username).await;
        tracing::info!("User '{}' unregistered", username);
    }

    /// Post a message from a registered sender.
    ///
    /// Fails with `BadInput` if sender or content is missing or empty, with
    /// `NotFound` if the sender is not registered. A successful post also
    /// refreshes the sender's liveness.
    pub async fn post_message(
        &self,
        sender: Option<String>,
        content: Option<String>,
    ) -> Result<ChatMessage, ChatError> {
        let sender = required_field(sender, "sender")?;
        let content = required_field(content, "content")?;
        self.store.post_message(&sender, &content).await
    }

    /// Messages newer than `since` (default 0 = full history), in append
    /// order. Never fails.
    pub async fn fetch_messages(&self, since: Option<i64>) -> Vec<ChatMessage> {
        self.store.messages_since(since.unwrap_or(0)).await
    }
}

fn required_field(value: Option<String>, name: &'static str) -> Result<String, ChatError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ChatError::BadInput(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::time::ManualClock, infrastructure::InMemoryChatStore};

    fn create_test_service() -> ChatService {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        ChatService::new(Arc::new(InMemoryChatStore::new(clock)))
    }

    #[tokio::test]
    async fn test_register_with_missing_username_is_bad_input() {
        // テスト項目: username 欠落の登録は BadInput になる
        // given (前提条件):
        let service = create_test_service();

        // when (操作):
        let result = service.register(None).await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::BadInput("username")));
    }

    #[tokio::test]
    async fn test_register_with_empty_username_is_bad_input() {
        // テスト項目: 空文字・空白のみの username は BadInput になる
        // given (前提条件):
        let service = create_test_service();

        // when (操作):
        let empty = service.register(Some("".to_string())).await;
        let blank = service.register(Some("   ".to_string())).await;

        // then (期待する結果):
        assert_eq!(empty, Err(ChatError::BadInput("username")));
        assert_eq!(blank, Err(ChatError::BadInput("username")));
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        // テスト項目: 既存ユーザー名の登録は Conflict になる
        // given (前提条件):
        let service = create_test_service();
        service.register(Some("alice".to_string())).await.unwrap();

        // when (操作):
        let result = service.register(Some("alice".to_string())).await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::Conflict("alice".to_string())));
        assert_eq!(service.list_users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_heartbeat_for_unknown_user_is_not_found() {
        // テスト項目: 未知ユーザーの heartbeat は NotFound、既知ユーザーは成功
        // given (前提条件):
        let service = create_test_service();
        service.register(Some("alice".to_string())).await.unwrap();

        // when (操作):
        let known = service.heartbeat("alice").await;
        let unknown = service.heartbeat("bob").await;

        // then (期待する結果):
        assert!(known.is_ok());
        assert_eq!(unknown, Err(ChatError::NotFound("bob".to_string())));
    }

    #[tokio::test]
    async fn test_unregister_never_fails() {
        // テスト項目: unregister は未知ユーザーに対しても成功する（冪等）
        // given (前提条件):
        let service = create_test_service();
        service.register(Some("alice".to_string())).await.unwrap();

        // when (操作):
        service.unregister("alice").await;
        service.unregister("alice").await;
        service.unregister("nobody").await;

        // then (期待する結果):
        assert!(service.list_users().await.is_empty());
    }

    #[tokio::test]
    async fn test_post_message_with_missing_fields_is_bad_input() {
        // テスト項目: sender / content の欠落はどちらも BadInput になる
        // given (前提条件):
        let service = create_test_service();
        service.register(Some("alice".to_string())).await.unwrap();

        // when (操作):
        let no_sender = service.post_message(None, Some("hi".to_string())).await;
        let no_content = service.post_message(Some("alice".to_string()), None).await;

        // then (期待する結果):
        assert_eq!(no_sender, Err(ChatError::BadInput("sender")));
        assert_eq!(no_content, Err(ChatError::BadInput("content")));
    }

    #[tokio::test]
    async fn test_post_message_from_unknown_sender_is_not_found() {
        // テスト項目: 未登録の送信者による投稿は NotFound になる
        // given (前提条件):
        let service = create_test_service();

        // when (操作):
        let result = service
            .post_message(Some("bob".to_string()), Some("hello".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::NotFound("bob".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_messages_defaults_to_full_history() {
        // テスト項目: since 省略時は全履歴が追加順で返る
        // given (前提条件):
        let service = create_test_service();
        service.register(Some("alice".to_string())).await.unwrap();
        service
            .post_message(Some("alice".to_string()), Some("hi".to_string()))
            .await
            .unwrap();

        // when (操作):
        let messages = service.fetch_messages(None).await;

        // then (期待する結果): 参加アナウンス + 投稿の 2 件
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "hi");
    }
}
