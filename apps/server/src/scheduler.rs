//! Background price refresh.
//!
//! Runs the refresh scheduler on its own task and watches it: if the task
//! panics or stops while the service is still up, the cache can no longer
//! be trusted, so the process is taken down through the normal shutdown path.

use std::sync::Arc;

use price_proxy_core::RefreshScheduler;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::main_lib::AppState;

/// Spawn the refresh loop. The returned handle resolves once the loop has
/// stopped and the supervisor has reacted.
pub fn start_price_refresh(state: Arc<AppState>) -> JoinHandle<()> {
    let shutdown = state.shutdown.clone();
    let scheduler = RefreshScheduler::new(state.engine.clone(), shutdown.clone());
    let task = tokio::spawn(scheduler.run());

    tokio::spawn(async move {
        match task.await {
            Ok(()) if shutdown.is_triggered() => debug!("Price refresh task finished"),
            Ok(()) => {
                error!("Price refresh task exited unexpectedly, shutting down");
                shutdown.trigger();
            }
            Err(e) => {
                error!("Price refresh task failed: {}, shutting down", e);
                shutdown.trigger();
            }
        }
    })
}
