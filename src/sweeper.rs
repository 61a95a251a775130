//! Periodic eviction of stale sessions.
//!
//! Clients that crash or lose connectivity without an explicit unregister
//! are reclaimed here; this is the only mechanism bounding registry growth.

use std::{sync::Arc, time::Duration};

use tokio::time::MissedTickBehavior;

use crate::domain::ChatStore;

/// Background task that sweeps inactive users on a fixed interval.
///
/// Each tick is independent: whatever happens during one sweep, the next
/// tick still fires.
pub struct SessionSweeper {
    store: Arc<dyn ChatStore>,
    interval: Duration,
    max_idle: Duration,
}

impl SessionSweeper {
    /// Reference sweep interval (one minute)
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);
    /// Reference idle threshold (15 minutes)
    pub const DEFAULT_MAX_IDLE: Duration = Duration::from_secs(15 * 60);

    /// Create a sweeper over the given store
    pub fn new(store: Arc<dyn ChatStore>, interval: Duration, max_idle: Duration) -> Self {
        Self {
            store,
            interval,
            max_idle,
        }
    }

    /// Run the sweep loop forever. Intended to be `tokio::spawn`ed.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of `interval` completes immediately; consume it so
        // the first sweep happens one full interval after startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = self.store.sweep_inactive(self.max_idle).await;
            if removed > 0 {
                tracing::info!("{} inactive user(s) removed", removed);
            } else {
                tracing::debug!("Sweep found no inactive users");
            }
        }
    }
}
