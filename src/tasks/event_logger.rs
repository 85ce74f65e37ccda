//! Timer event logging background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::state::{AppState, TimerEvent};

/// Background task that renders timer notifications to the log
pub async fn event_logger_task(state: Arc<AppState>) {
    info!("Starting event logger task");

    let mut events = state.subscribe_events();

    loop {
        match events.recv().await {
            Ok(event) => log_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event logger lagged, skipped {} timer events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, event logger exiting");
                break;
            }
        }
    }
}

fn log_event(event: &TimerEvent) {
    match event {
        TimerEvent::Tick { .. } => {
            debug!("{} {}", event.phase(), event.formatted());
        }
        TimerEvent::PhaseSwitch { .. } => {
            info!("Phase switch: now {} for {}", event.phase(), event.formatted());
        }
    }

    match serde_json::to_string(event) {
        Ok(json) => debug!(target: "phase_timer::events", "{}", json),
        Err(e) => warn!("Failed to serialize timer event: {}", e),
    }
}
