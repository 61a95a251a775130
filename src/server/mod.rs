//! REST shell of the chat room server.

mod handler;
mod runner;
mod signal;
mod state;

pub use runner::{router, run_server};
pub use state::AppState;
