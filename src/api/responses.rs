//! API response structures

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::state::{countdown_config::FORM_FIELDS, ConfigError, ControlError, ViewSnapshot};

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub countdown: Option<ViewSnapshot>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, countdown: Option<ViewSnapshot>) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            countdown,
        }
    }

    /// Response for a view that is open and counting down
    pub fn playing(message: String, countdown: ViewSnapshot) -> Self {
        Self::new("playing", message, Some(countdown))
    }

    /// Response for a view that is open but paused
    pub fn paused(message: String, countdown: ViewSnapshot) -> Self {
        Self::new("paused", message, Some(countdown))
    }

    /// Pick `playing` or `paused` from the snapshot
    pub fn for_snapshot(message: String, countdown: ViewSnapshot) -> Self {
        if countdown.frame.running {
            Self::playing(message, countdown)
        } else {
            Self::paused(message, countdown)
        }
    }

    /// Response once the view is gone
    pub fn closed(message: String) -> Self {
        Self::new("closed", message, None)
    }
}

/// Error body with an optional form field the message belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub field: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Handler failure, rendered as a status code plus `ErrorResponse`
#[derive(Debug)]
pub struct ApiError {
    pub code: StatusCode,
    pub field: Option<String>,
    pub message: String,
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        warn!("Rejected countdown configuration: {}", e);
        Self {
            code: StatusCode::UNPROCESSABLE_ENTITY,
            field: Some(e.field().to_string()),
            message: e.to_string(),
        }
    }
}

impl From<ControlError> for ApiError {
    fn from(e: ControlError) -> Self {
        let code = match e {
            ControlError::NoView => StatusCode::CONFLICT,
            ControlError::Lock(_) => {
                error!("{}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            code,
            field: None,
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        warn!("Rejected countdown request body: {}", message);

        let field = match rejection {
            JsonRejection::JsonDataError(_) => FORM_FIELDS
                .iter()
                .find(|field| message.contains(&format!("{field}:")))
                .map(|field| field.to_string()),
            _ => None,
        };
        let code = match rejection {
            JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => rejection.status(),
        };

        Self { code, field, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            field: self.field,
            message: self.message,
            timestamp: Utc::now(),
        };
        (self.code, Json(body)).into_response()
    }
}

/// Status response with the open view, if any
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub view_open: bool,
    pub playing: bool,
    pub countdown: Option<ViewSnapshot>,
    pub tick_interval_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
