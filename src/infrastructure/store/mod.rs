//! Concrete [`ChatStore`](crate::domain::ChatStore) implementations.

mod inmemory;

pub use inmemory::InMemoryChatStore;
