use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AirDay, EpisodeMarker, Priority, ShowId, ShowStatus};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A show as returned to clients, with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowDto {
    pub id: ShowId,
    pub title: String,
    pub service: Option<String>,
    pub current_episode: EpisodeMarker,
    pub latest_available_episode: EpisodeMarker,
    pub status: ShowStatus,
    pub air_day: Option<AirDay>,
    pub priority: Priority,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub shows: u64,
}
