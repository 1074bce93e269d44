use crate::domain::EpisodeMarker;
use crate::models::{NewShow, Show, ShowUpdate, WatchEntry};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::show::format_timestamp;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Every pooled connection to `:memory:` would see its own empty database.
        let in_memory = db_url.contains(":memory:");
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections.max(1), min_connections.min(max_connections))
        };

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn show_repo(&self) -> repositories::show::ShowRepository {
        repositories::show::ShowRepository::new(self.conn.clone())
    }

    pub async fn list_shows(&self) -> Result<Vec<Show>> {
        self.show_repo().list().await
    }

    pub async fn count_shows(&self) -> Result<u64> {
        self.show_repo().count().await
    }

    pub async fn get_show(&self, id: i32) -> Result<Option<Show>> {
        self.show_repo().get(id).await
    }

    pub async fn insert_show(&self, show: &NewShow, now: DateTime<Utc>) -> Result<Show> {
        self.show_repo().insert(show, now).await
    }

    pub async fn update_show(
        &self,
        id: i32,
        update: &ShowUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Show>> {
        self.show_repo().update(id, update, now).await
    }

    pub async fn delete_show(&self, id: i32) -> Result<bool> {
        self.show_repo().delete(id).await
    }

    pub async fn mark_caught_up(&self, id: i32, now: DateTime<Utc>) -> Result<Option<Show>> {
        self.show_repo().mark_caught_up(id, now).await
    }

    pub async fn advance_episode(&self, id: i32, now: DateTime<Utc>) -> Result<Option<Show>> {
        self.show_repo().advance_episode(id, now).await
    }

    pub async fn record_watch(
        &self,
        id: i32,
        marker: EpisodeMarker,
        now: DateTime<Utc>,
    ) -> Result<Option<Show>> {
        self.show_repo().record_watch(id, marker, now).await
    }

    pub async fn watch_history(&self, id: i32) -> Result<Vec<WatchEntry>> {
        self.show_repo().history(id).await
    }
}
