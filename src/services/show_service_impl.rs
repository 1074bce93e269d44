//! `SeaORM` implementation of the [`ShowService`] trait.

use crate::api::types::ShowDto;
use crate::db::Store;
use crate::domain::{EpisodeMarker, ShowId, ShowSort};
use crate::models::{NewShow, ShowUpdate, WatchEntry};
use crate::services::show_service::{
    MAX_NOTES_CHARS, MAX_SERVICE_CHARS, ShowError, ShowService, normalize_text, normalize_title,
    show_to_dto, sort_shows,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

pub struct SeaOrmShowService {
    store: Arc<Store>,
}

impl SeaOrmShowService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    async fn ensure_exists(&self, id: ShowId) -> Result<(), ShowError> {
        self.store
            .get_show(id.value())
            .await?
            .map(|_| ())
            .ok_or(ShowError::NotFound(id))
    }
}

fn normalize_new_show(mut new_show: NewShow) -> Result<NewShow, ShowError> {
    new_show.title = normalize_title(&new_show.title)?;
    new_show.service = normalize_text("Service", new_show.service, MAX_SERVICE_CHARS)?;
    new_show.notes = normalize_text("Notes", new_show.notes, MAX_NOTES_CHARS)?;
    Ok(new_show)
}

fn normalize_update(mut update: ShowUpdate) -> Result<ShowUpdate, ShowError> {
    if let Some(title) = &update.title {
        update.title = Some(normalize_title(title)?);
    }
    if let Some(service) = update.service {
        update.service = Some(normalize_text("Service", service, MAX_SERVICE_CHARS)?);
    }
    if let Some(notes) = update.notes {
        update.notes = Some(normalize_text("Notes", notes, MAX_NOTES_CHARS)?);
    }
    Ok(update)
}

#[async_trait::async_trait]
impl ShowService for SeaOrmShowService {
    async fn list_shows(&self, sort: ShowSort) -> Result<Vec<ShowDto>, ShowError> {
        let shows = self.store.list_shows().await?;

        let mut dtos: Vec<ShowDto> = shows.into_iter().map(show_to_dto).collect();
        sort_shows(&mut dtos, sort);

        debug!(count = dtos.len(), ?sort, "Listed shows");
        Ok(dtos)
    }

    async fn create_show(&self, new_show: NewShow) -> Result<ShowDto, ShowError> {
        let new_show = normalize_new_show(new_show)?;

        let show = self.store.insert_show(&new_show, Utc::now()).await?;

        metrics::counter!("shows_created_total").increment(1);
        info!(
            event = "show_created",
            show_id = show.id.value(),
            title = %show.title,
            "Show created"
        );

        Ok(show_to_dto(show))
    }

    async fn get_show(&self, id: ShowId) -> Result<ShowDto, ShowError> {
        let show = self
            .store
            .get_show(id.value())
            .await?
            .ok_or(ShowError::NotFound(id))?;

        Ok(show_to_dto(show))
    }

    async fn update_show(&self, id: ShowId, update: ShowUpdate) -> Result<ShowDto, ShowError> {
        let update = normalize_update(update)?;

        let show = self
            .store
            .update_show(id.value(), &update, Utc::now())
            .await?
            .ok_or(ShowError::NotFound(id))?;

        info!(event = "show_updated", show_id = id.value(), "Show updated");
        Ok(show_to_dto(show))
    }

    async fn delete_show(&self, id: ShowId) -> Result<(), ShowError> {
        if !self.store.delete_show(id.value()).await? {
            return Err(ShowError::NotFound(id));
        }

        metrics::counter!("shows_deleted_total").increment(1);
        info!(event = "show_deleted", show_id = id.value(), "Show deleted");
        Ok(())
    }

    async fn mark_caught_up(&self, id: ShowId) -> Result<ShowDto, ShowError> {
        let show = self
            .store
            .mark_caught_up(id.value(), Utc::now())
            .await?
            .ok_or(ShowError::NotFound(id))?;

        metrics::counter!("shows_caught_up_total").increment(1);
        info!(
            event = "show_caught_up",
            show_id = id.value(),
            episode = %show.current_episode,
            "Show marked caught up"
        );

        Ok(show_to_dto(show))
    }

    async fn mark_watched(&self, id: ShowId, episode: EpisodeMarker) -> Result<ShowDto, ShowError> {
        let show = self
            .store
            .record_watch(id.value(), episode, Utc::now())
            .await?
            .ok_or(ShowError::NotFound(id))?;

        info!(
            event = "show_watched",
            show_id = id.value(),
            %episode,
            "Episode marked watched"
        );

        Ok(show_to_dto(show))
    }

    async fn watch_history(&self, id: ShowId) -> Result<Vec<WatchEntry>, ShowError> {
        self.ensure_exists(id).await?;
        Ok(self.store.watch_history(id.value()).await?)
    }

    async fn next_episode(&self, id: ShowId) -> Result<ShowDto, ShowError> {
        if let Some(show) = self.store.advance_episode(id.value(), Utc::now()).await? {
            info!(
                event = "show_advanced",
                show_id = id.value(),
                episode = %show.current_episode,
                "Advanced to next episode"
            );
            return Ok(show_to_dto(show));
        }

        // Nothing was updated: either the show is gone or it is at the last episode number.
        self.ensure_exists(id).await?;
        Err(ShowError::Validation(format!(
            "Episode number cannot go past {}",
            EpisodeMarker::MAX_EPISODE
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(season: u32, episode: u32) -> EpisodeMarker {
        EpisodeMarker::new(season, episode).unwrap()
    }

    #[test]
    fn new_show_is_normalized() {
        let mut new = NewShow::new("  The Bear ", marker(3, 1), marker(3, 10));
        new.service = Some("   ".to_string());
        new.notes = Some(" chef ".to_string());

        let normalized = normalize_new_show(new).unwrap();
        assert_eq!(normalized.title, "The Bear");
        assert_eq!(normalized.service, None);
        assert_eq!(normalized.notes.as_deref(), Some("chef"));
    }

    #[test]
    fn update_keeps_absent_and_clears_blank() {
        let update = ShowUpdate {
            service: Some(Some(" ".to_string())),
            ..ShowUpdate::default()
        };
        let normalized = normalize_update(update).unwrap();
        assert_eq!(normalized.service, Some(None));
        assert_eq!(normalized.notes, None);
        assert_eq!(normalized.title, None);

        let update = ShowUpdate {
            title: Some("  ".to_string()),
            ..ShowUpdate::default()
        };
        assert!(matches!(normalize_update(update), Err(ShowError::Validation(_))));
    }
}
