//! Polling chat room REST server.
//!
//! Holds the authoritative room state in memory and serves it over a
//! request/response API polled by clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use chatroom_rs::{
    common::{logger::setup_logger, time::SystemClock},
    domain::ChatStore,
    infrastructure::InMemoryChatStore,
    server::run_server,
    service::ChatService,
    sweeper::SessionSweeper,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Polling chat room server with inactivity sweep", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8081")]
    port: u16,

    /// Seconds between two inactivity sweeps
    #[arg(long, default_value_t = SessionSweeper::DEFAULT_INTERVAL.as_secs())]
    sweep_interval_secs: u64,

    /// Seconds of inactivity after which a user is evicted
    #[arg(long, default_value_t = SessionSweeper::DEFAULT_MAX_IDLE.as_secs())]
    max_idle_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Store (in-memory room state)
    // 2. Service (request contract)
    // 3. Sweeper (background eviction)
    // 4. Server

    // 1. Create the store with the system clock
    let store: Arc<dyn ChatStore> = Arc::new(InMemoryChatStore::new(Arc::new(SystemClock)));

    // 2. Create the request contract
    let service = ChatService::new(store.clone());

    // 3. Spawn the session sweeper on its own schedule
    let sweeper = SessionSweeper::new(
        store,
        Duration::from_secs(args.sweep_interval_secs),
        Duration::from_secs(args.max_idle_secs),
    );
    tracing::info!(
        "Session sweeper scheduled every {}s (idle threshold {}s)",
        args.sweep_interval_secs,
        args.max_idle_secs
    );
    tokio::spawn(sweeper.run());

    // 4. Run the server
    if let Err(e) = run_server(service, args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
