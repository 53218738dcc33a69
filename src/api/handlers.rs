//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use tracing::info;

use crate::state::{AppState, Applied, ConfigForm};
use super::responses::{ApiError, ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /countdown - Open the countdown view or update the open one
pub async fn countdown_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Json<ConfigForm>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(form) = form?;
    let config = form.validate()?;

    let response = match state.apply_config(config)? {
        Applied::Opened(snapshot) => {
            info!("Countdown endpoint called - view opened for {}", config.time);
            ApiResponse::for_snapshot("Countdown opened".to_string(), snapshot)
        }
        Applied::Updated(snapshot) => {
            info!("Countdown endpoint called - view updated to {}", config.time);
            ApiResponse::for_snapshot("Countdown updated".to_string(), snapshot)
        }
    };
    Ok(Json(response))
}

/// Handle DELETE /countdown - Close the countdown view
pub async fn close_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    state.close_view()?;
    info!("Close endpoint called - countdown view closed");
    Ok(Json(ApiResponse::closed("Countdown closed".to_string())))
}

/// Handle POST /toggle - Play/Pause
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.toggle()?;
    let message = if snapshot.frame.running { "Countdown playing" } else { "Countdown paused" };
    Ok(Json(ApiResponse::for_snapshot(message.to_string(), snapshot)))
}

/// Handle POST /play - Start or resume playback
pub async fn play_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.play()?;
    Ok(Json(ApiResponse::playing("Countdown playing".to_string(), snapshot)))
}

/// Handle POST /pause - Pause playback
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.pause()?;
    Ok(Json(ApiResponse::paused("Countdown paused".to_string(), snapshot)))
}

/// Handle GET /status - Return the current view and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let countdown = state.snapshot()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        view_open: countdown.is_some(),
        playing: countdown.map_or(false, |c| c.frame.running),
        countdown,
        tick_interval_ms: state.tick_interval.as_millis() as u64,
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
