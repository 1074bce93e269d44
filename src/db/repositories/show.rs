use crate::domain::{AirDay, EpisodeMarker, Priority, ShowId};
use crate::entities::{prelude::*, shows, watch_history};
use crate::models::{NewShow, Show, ShowUpdate, WatchEntry};
use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::info;

pub struct ShowRepository {
    conn: DatabaseConnection,
}

/// Fixed-width UTC timestamps so stored values sort lexicographically.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid timestamp in database: {raw}"))
}

fn column(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl ShowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_show(model: shows::Model) -> anyhow::Result<Show> {
        let id = model.id;

        let current_episode = EpisodeMarker::from_parts(
            i64::from(model.current_season),
            i64::from(model.current_episode),
        )
        .with_context(|| format!("Corrupt current episode for show {id}"))?;

        let latest_available_episode = EpisodeMarker::from_parts(
            i64::from(model.latest_season),
            i64::from(model.latest_episode),
        )
        .with_context(|| format!("Corrupt latest episode for show {id}"))?;

        let air_day = model
            .air_day
            .as_deref()
            .map(str::parse::<AirDay>)
            .transpose()
            .map_err(anyhow::Error::msg)?;

        Ok(Show {
            id: ShowId::new(id),
            title: model.title,
            service: model.service,
            current_episode,
            latest_available_episode,
            air_day,
            priority: Priority::new(i64::from(model.priority)).map_err(anyhow::Error::msg)?,
            notes: model.notes,
            created_at: parse_timestamp(&model.created_at)?,
            updated_at: parse_timestamp(&model.updated_at)?,
        })
    }

    fn map_model_to_entry(model: watch_history::Model) -> anyhow::Result<WatchEntry> {
        Ok(WatchEntry {
            id: model.id,
            show_id: ShowId::new(model.show_id),
            episode: EpisodeMarker::from_parts(i64::from(model.season), i64::from(model.episode))
                .with_context(|| format!("Corrupt watch history entry {}", model.id))?,
            watched_at: parse_timestamp(&model.watched_at)?,
        })
    }

    pub async fn insert(&self, show: &NewShow, now: DateTime<Utc>) -> anyhow::Result<Show> {
        let timestamp = format_timestamp(now);

        let active_model = shows::ActiveModel {
            title: Set(show.title.clone()),
            service: Set(show.service.clone()),
            current_season: Set(column(show.current_episode.season())),
            current_episode: Set(column(show.current_episode.episode())),
            latest_season: Set(column(show.latest_available_episode.season())),
            latest_episode: Set(column(show.latest_available_episode.episode())),
            air_day: Set(show.air_day.map(String::from)),
            priority: Set(i32::from(show.priority.unwrap_or_default().value())),
            notes: Set(show.notes.clone()),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!("Added show: {} (ID: {})", model.title, model.id);

        Self::map_model_to_show(model)
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<Show>> {
        Shows::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Self::map_model_to_show)
            .transpose()
    }

    /// All shows in creation order.
    pub async fn list(&self) -> anyhow::Result<Vec<Show>> {
        let rows = Shows::find()
            .order_by_asc(shows::Column::Id)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model_to_show).collect()
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        Ok(Shows::find().count(&self.conn).await?)
    }

    /// Applies the supplied fields with a single UPDATE, so the transaction
    /// holds the write lock from its first statement.
    pub async fn update(
        &self,
        id: i32,
        update: &ShowUpdate,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<Show>> {
        let mut query = Shows::update_many()
            .col_expr(shows::Column::UpdatedAt, Expr::value(format_timestamp(now)))
            .filter(shows::Column::Id.eq(id));

        if let Some(title) = &update.title {
            query = query.col_expr(shows::Column::Title, Expr::value(title.clone()));
        }
        if let Some(service) = &update.service {
            query = query.col_expr(shows::Column::Service, Expr::value(service.clone()));
        }
        if let Some(marker) = update.current_episode {
            query = query
                .col_expr(shows::Column::CurrentSeason, Expr::value(column(marker.season())))
                .col_expr(shows::Column::CurrentEpisode, Expr::value(column(marker.episode())));
        }
        if let Some(marker) = update.latest_available_episode {
            query = query
                .col_expr(shows::Column::LatestSeason, Expr::value(column(marker.season())))
                .col_expr(shows::Column::LatestEpisode, Expr::value(column(marker.episode())));
        }
        if let Some(air_day) = update.air_day {
            query = query.col_expr(shows::Column::AirDay, Expr::value(air_day.map(String::from)));
        }
        if let Some(priority) = update.priority {
            query = query.col_expr(
                shows::Column::Priority,
                Expr::value(i32::from(priority.value())),
            );
        }
        if let Some(notes) = &update.notes {
            query = query.col_expr(shows::Column::Notes, Expr::value(notes.clone()));
        }

        let txn = self.conn.begin().await?;

        let result = query.exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let model = Shows::find_by_id(id)
            .one(&txn)
            .await?
            .with_context(|| format!("Show {id} disappeared during update"))?;
        txn.commit().await?;

        Self::map_model_to_show(model).map(Some)
    }

    pub async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await?;

        WatchHistory::delete_many()
            .filter(watch_history::Column::ShowId.eq(id))
            .exec(&txn)
            .await?;

        let result = Shows::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed show with ID: {}", id);
        }
        Ok(removed)
    }

    /// Copies the latest marker onto the current one in a single statement.
    pub async fn mark_caught_up(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<Show>> {
        let txn = self.conn.begin().await?;

        let result = Shows::update_many()
            .col_expr(
                shows::Column::CurrentSeason,
                Expr::col(shows::Column::LatestSeason).into(),
            )
            .col_expr(
                shows::Column::CurrentEpisode,
                Expr::col(shows::Column::LatestEpisode).into(),
            )
            .col_expr(
                shows::Column::UpdatedAt,
                Expr::value(format_timestamp(now)),
            )
            .filter(shows::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let model = Shows::find_by_id(id)
            .one(&txn)
            .await?
            .with_context(|| format!("Show {id} disappeared during update"))?;
        txn.commit().await?;

        Self::map_model_to_show(model).map(Some)
    }

    /// Increments the current episode unless it is already at the maximum.
    ///
    /// Returns `None` both for unknown ids and for shows at the limit.
    pub async fn advance_episode(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<Show>> {
        let txn = self.conn.begin().await?;

        let result = Shows::update_many()
            .col_expr(
                shows::Column::CurrentEpisode,
                Expr::col(shows::Column::CurrentEpisode).add(1),
            )
            .col_expr(
                shows::Column::UpdatedAt,
                Expr::value(format_timestamp(now)),
            )
            .filter(shows::Column::Id.eq(id))
            .filter(shows::Column::CurrentEpisode.lt(column(EpisodeMarker::MAX_EPISODE)))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let model = Shows::find_by_id(id)
            .one(&txn)
            .await?
            .with_context(|| format!("Show {id} disappeared during update"))?;
        txn.commit().await?;

        Self::map_model_to_show(model).map(Some)
    }

    /// Moves the current marker and appends a history row in one transaction.
    ///
    /// The show row is updated first so the history insert never races a
    /// concurrent writer for the lock.
    pub async fn record_watch(
        &self,
        id: i32,
        marker: EpisodeMarker,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<Show>> {
        let timestamp = format_timestamp(now);
        let txn = self.conn.begin().await?;

        let result = Shows::update_many()
            .col_expr(shows::Column::CurrentSeason, Expr::value(column(marker.season())))
            .col_expr(shows::Column::CurrentEpisode, Expr::value(column(marker.episode())))
            .col_expr(shows::Column::UpdatedAt, Expr::value(timestamp.clone()))
            .filter(shows::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        WatchHistory::insert(watch_history::ActiveModel {
            show_id: Set(id),
            season: Set(column(marker.season())),
            episode: Set(column(marker.episode())),
            watched_at: Set(timestamp),
            ..Default::default()
        })
        .exec(&txn)
        .await?;

        let model = Shows::find_by_id(id)
            .one(&txn)
            .await?
            .with_context(|| format!("Show {id} disappeared during update"))?;
        txn.commit().await?;

        info!("Recorded {} as watched for show {}", marker, id);
        Self::map_model_to_show(model).map(Some)
    }

    /// Watch history for a show, newest first.
    pub async fn history(&self, id: i32) -> anyhow::Result<Vec<WatchEntry>> {
        let rows = WatchHistory::find()
            .filter(watch_history::Column::ShowId.eq(id))
            .order_by_desc(watch_history::Column::WatchedAt)
            .order_by_desc(watch_history::Column::Id)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model_to_entry).collect()
    }
}
