//! Tick driver background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{state::AppState, timer::ScheduleId};

/// Background task that delivers scheduled firings to the phase timer.
///
/// Firings arrive strictly one at a time and each is applied under the
/// timer lock, so ticks never overlap with each other or with a control call.
pub async fn tick_driver_task(state: Arc<AppState>, mut fire_rx: mpsc::UnboundedReceiver<ScheduleId>) {
    info!("Starting tick driver task");

    while let Some(id) = fire_rx.recv().await {
        match state.fire(id) {
            Ok(true) => {}
            Ok(false) => debug!("Dropped stale firing from schedule {:?}", id),
            Err(e) => error!("Failed to deliver tick: {}", e),
        }
    }

    info!("Scheduler channel closed, tick driver exiting");
}
