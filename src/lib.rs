//! Polling chat room backend library.
//!
//! This library provides the in-memory state of a single chat room (user
//! registry and message log), the request-handling contract on top of it,
//! a background sweeper for stale sessions, and the REST shell serving it.

// layers
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod service;
pub mod sweeper;

// shared library
pub mod common;
