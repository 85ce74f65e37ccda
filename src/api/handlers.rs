//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, TimerSnapshot};
use super::responses::{ControlResponse, HealthResponse, StatusResponse};

fn control_reply(
    action: &str,
    result: Result<TimerSnapshot, String>,
) -> Result<Json<ControlResponse>, StatusCode> {
    match result {
        Ok(timer) => {
            info!("{} endpoint called - {} at {}", action, timer.phase, timer.formatted);
            let message = if timer.running {
                format!("Timer running in {} phase", timer.phase)
            } else {
                format!("Timer stopped at {} in {} phase", timer.formatted, timer.phase)
            };
            Ok(Json(ControlResponse::new(message, timer)))
        }
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Begin or continue the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    control_reply("start", state.start())
}

/// Handle POST /pause - Pause the countdown, keeping remaining time
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    control_reply("pause", state.pause())
}

/// Handle POST /reset - Stop and restore the current phase's full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    control_reply("reset", state.reset())
}

/// Handle POST /toggle - Start when idle, pause when running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    control_reply("toggle", state.toggle())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        phase_label: timer.phase_label(),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
