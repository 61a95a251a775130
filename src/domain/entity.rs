//! Entities of the chat room: users and messages.

use serde::{Deserialize, Serialize};

/// Sender name reserved for system-generated announcements (join/leave).
pub const SYSTEM_SENDER: &str = "System";

/// A registered user and its liveness timestamp.
///
/// `last_active_at` is refreshed on registration, heartbeat and message
/// post; the sweeper evicts users whose timestamp falls behind the idle
/// threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    /// Unix timestamp in milliseconds of the last observed activity
    pub last_active_at: i64,
}

/// A message in the room log.
///
/// The timestamp is assigned by the store at append time and doubles as the
/// client-side incremental cursor. Append order is authoritative for
/// display; the timestamp only filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub content: String,
    /// Unix timestamp in milliseconds, assigned at append time
    pub timestamp: i64,
}

impl ChatMessage {
    /// True if this message was generated by the server itself
    pub fn is_system(&self) -> bool {
        self.sender == SYSTEM_SENDER
    }
}

/// Announcement appended when a user joins the room
pub fn join_notice(username: &str) -> String {
    format!("{username} a rejoint la chatroom")
}

/// Announcement appended when a user leaves the room
pub fn leave_notice(username: &str) -> String {
    format!("{username} a quitté la chatroom")
}
