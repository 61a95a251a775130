//! Domain model of the chat room.
//!
//! Defines the entities exchanged at the API boundary, the error taxonomy
//! raised by the core, and the storage interface the rest of the application
//! depends on. Concrete storage lives in the infrastructure layer.

mod entity;
mod error;
mod store;

pub use entity::{ChatMessage, SYSTEM_SENDER, User, join_notice, leave_notice};
pub use error::ChatError;
pub use store::ChatStore;
