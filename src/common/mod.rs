//! Shared utilities used across the application.

pub mod logger;
pub mod time;
