//! Domain service for tracking shows.
//!
//! Handlers and CLI commands go through [`ShowService`] rather than the
//! store, so validation and normalization happen in one place.

use crate::api::types::ShowDto;
use crate::domain::{AirDay, EpisodeMarker, ShowId, ShowSort, ShowStatus};
use crate::models::{NewShow, Show, ShowUpdate, WatchEntry};
use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_SERVICE_CHARS: usize = 200;
pub const MAX_NOTES_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum ShowError {
    #[error("Show not found: {0}")]
    NotFound(ShowId),

    #[error("Invalid show data: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ShowError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ShowError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Operations on the tracked show list.
///
/// # Examples
///
/// ```rust,ignore
/// use whatson::services::{ShowError, ShowService};
/// use whatson::domain::ShowId;
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn ShowService>) -> Result<(), ShowError> {
///     let show = service.mark_caught_up(ShowId::new(1)).await?;
///     assert_eq!(show.status, whatson::domain::ShowStatus::ReadyToWatch);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait ShowService: Send + Sync {
    /// Lists every show with its derived status.
    ///
    /// # Errors
    ///
    /// Returns [`ShowError::Database`] on connection failures.
    async fn list_shows(&self, sort: ShowSort) -> Result<Vec<ShowDto>, ShowError>;

    /// Creates a show and assigns its id and timestamps.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::Validation`] for an empty title or oversized text
    /// - Returns [`ShowError::Database`] on connection failures
    async fn create_show(&self, new_show: NewShow) -> Result<ShowDto, ShowError>;

    /// # Errors
    ///
    /// - Returns [`ShowError::NotFound`] if the show does not exist
    /// - Returns [`ShowError::Database`] on connection failures
    async fn get_show(&self, id: ShowId) -> Result<ShowDto, ShowError>;

    /// Applies a partial update. Absent fields are left unchanged.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::NotFound`] if the show does not exist
    /// - Returns [`ShowError::Validation`] for invalid field values
    /// - Returns [`ShowError::Database`] on connection failures
    async fn update_show(&self, id: ShowId, update: ShowUpdate) -> Result<ShowDto, ShowError>;

    /// Permanently removes a show and its watch history.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::NotFound`] if the show does not exist
    /// - Returns [`ShowError::Database`] on connection failures
    async fn delete_show(&self, id: ShowId) -> Result<(), ShowError>;

    /// Moves the current episode up to the latest available one.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::NotFound`] if the show does not exist
    /// - Returns [`ShowError::Database`] on connection failures
    async fn mark_caught_up(&self, id: ShowId) -> Result<ShowDto, ShowError>;

    /// Records an episode as watched and makes it the current one.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::NotFound`] if the show does not exist
    /// - Returns [`ShowError::Database`] on connection failures
    async fn mark_watched(
        &self,
        id: ShowId,
        episode: EpisodeMarker,
    ) -> Result<ShowDto, ShowError>;

    /// Watch history, newest first.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::NotFound`] if the show does not exist
    /// - Returns [`ShowError::Database`] on connection failures
    async fn watch_history(&self, id: ShowId) -> Result<Vec<WatchEntry>, ShowError>;

    /// Advances the current episode by one within the same season.
    ///
    /// # Errors
    ///
    /// - Returns [`ShowError::NotFound`] if the show does not exist
    /// - Returns [`ShowError::Validation`] if the episode number is already at its maximum
    /// - Returns [`ShowError::Database`] on connection failures
    async fn next_episode(&self, id: ShowId) -> Result<ShowDto, ShowError>;
}

#[must_use]
pub fn show_to_dto(show: Show) -> ShowDto {
    let status = show.status();
    ShowDto {
        id: show.id,
        title: show.title,
        service: show.service,
        current_episode: show.current_episode,
        latest_available_episode: show.latest_available_episode,
        status,
        air_day: show.air_day,
        priority: show.priority,
        notes: show.notes,
        created_at: show.created_at,
        updated_at: show.updated_at,
    }
}

/// Trims a title and enforces the length limits.
pub fn normalize_title(raw: &str) -> Result<String, ShowError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ShowError::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ShowError::Validation(format!(
            "Title is too long (max {MAX_TITLE_CHARS} characters)"
        )));
    }
    Ok(title.to_string())
}

/// Trims optional free text; blank input is stored as `None`.
pub fn normalize_text(
    field: &str,
    raw: Option<String>,
    max_chars: usize,
) -> Result<Option<String>, ShowError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if text.chars().count() > max_chars {
        return Err(ShowError::Validation(format!(
            "{field} is too long (max {max_chars} characters)"
        )));
    }
    Ok(Some(text.to_string()))
}

pub fn sort_shows(shows: &mut [ShowDto], sort: ShowSort) {
    match sort {
        ShowSort::Created => shows.sort_by_key(|s| s.id.value()),
        ShowSort::Priority => shows.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| AirDay::rank(a.air_day).cmp(&AirDay::rank(b.air_day)))
                .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }),
        ShowSort::Title => shows.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.id.value().cmp(&b.id.value()))
        }),
        ShowSort::Updated => shows.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.value().cmp(&a.id.value()))
        }),
    }
}

/// Splits shows into the two dashboard groups.
///
/// The "Ready to Watch" group is ordered by air day so the week reads top
/// to bottom; "Catching Up" keeps the priority ordering.
#[must_use]
pub fn partition_by_status(mut shows: Vec<ShowDto>) -> (Vec<ShowDto>, Vec<ShowDto>) {
    sort_shows(&mut shows, ShowSort::Priority);

    let (mut ready, catching_up): (Vec<_>, Vec<_>) = shows
        .into_iter()
        .partition(|s| s.status == ShowStatus::ReadyToWatch);

    // Stable sort keeps priority order within a day.
    ready.sort_by_key(|s| AirDay::rank(s.air_day));

    (ready, catching_up)
}
