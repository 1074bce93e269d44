//! Show service behaviour against a real SQLite file.

use std::sync::Arc;
use whatson::db::Store;
use whatson::domain::{EpisodeMarker, ShowId, ShowSort, ShowStatus};
use whatson::models::{NewShow, ShowUpdate};
use whatson::services::{SeaOrmShowService, ShowError, ShowService};

struct TestDb {
    service: Arc<SeaOrmShowService>,
    path: std::path::PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

async fn setup() -> TestDb {
    let path =
        std::env::temp_dir().join(format!("whatson-service-test-{}.db", uuid::Uuid::new_v4()));
    let store = Store::new(&format!("sqlite:{}", path.display()))
        .await
        .expect("failed to open store");

    TestDb {
        service: Arc::new(SeaOrmShowService::new(Arc::new(store))),
        path,
    }
}

fn marker(season: u32, episode: u32) -> EpisodeMarker {
    EpisodeMarker::new(season, episode).unwrap()
}

#[tokio::test]
async fn foo_example_from_catching_up_to_ready() {
    let db = setup().await;

    let show = db
        .service
        .create_show(NewShow::new("Foo", marker(1, 3), marker(1, 5)))
        .await
        .unwrap();
    assert_eq!(show.status, ShowStatus::CatchingUp);

    let caught_up = db.service.mark_caught_up(show.id).await.unwrap();
    assert_eq!(caught_up.current_episode, marker(1, 5));
    assert_eq!(caught_up.status, ShowStatus::ReadyToWatch);

    let twice = db.service.mark_caught_up(show.id).await.unwrap();
    assert_eq!(twice.current_episode, caught_up.current_episode);
    assert_eq!(twice.latest_available_episode, caught_up.latest_available_episode);
    assert_eq!(twice.status, ShowStatus::ReadyToWatch);
}

#[tokio::test]
async fn current_ahead_of_latest_is_ready() {
    let db = setup().await;

    let show = db
        .service
        .create_show(NewShow::new("Ahead", marker(2, 1), marker(1, 10)))
        .await
        .unwrap();
    assert_eq!(show.status, ShowStatus::ReadyToWatch);
}

#[tokio::test]
async fn update_title_leaves_everything_else() {
    let db = setup().await;

    let mut new = NewShow::new("Before", marker(1, 1), marker(1, 4));
    new.service = Some("Max".to_string());
    let show = db.service.create_show(new).await.unwrap();

    let updated = db
        .service
        .update_show(
            show.id,
            ShowUpdate {
                title: Some("X".to_string()),
                ..ShowUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "X");
    assert_eq!(updated.service, show.service);
    assert_eq!(updated.current_episode, show.current_episode);
    assert_eq!(updated.latest_available_episode, show.latest_available_episode);
    assert_eq!(updated.priority, show.priority);
    assert_eq!(updated.created_at, show.created_at);
    assert!(updated.updated_at >= show.updated_at);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let db = setup().await;

    let show = db
        .service
        .create_show(NewShow::new("Temp", marker(1, 0), marker(1, 1)))
        .await
        .unwrap();

    db.service.delete_show(show.id).await.unwrap();

    assert!(matches!(
        db.service.get_show(show.id).await,
        Err(ShowError::NotFound(id)) if id == show.id
    ));
    assert!(matches!(
        db.service.delete_show(show.id).await,
        Err(ShowError::NotFound(_))
    ));
    assert!(matches!(
        db.service.watch_history(show.id).await,
        Err(ShowError::NotFound(_))
    ));
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let db = setup().await;
    let id = ShowId::new(77);

    assert!(matches!(db.service.get_show(id).await, Err(ShowError::NotFound(_))));
    assert!(matches!(db.service.mark_caught_up(id).await, Err(ShowError::NotFound(_))));
    assert!(matches!(db.service.next_episode(id).await, Err(ShowError::NotFound(_))));
    assert!(matches!(
        db.service.mark_watched(id, marker(1, 1)).await,
        Err(ShowError::NotFound(_))
    ));
    assert!(matches!(
        db.service.update_show(id, ShowUpdate::default()).await,
        Err(ShowError::NotFound(_))
    ));
}

#[tokio::test]
async fn mark_watched_records_history() {
    let db = setup().await;

    let show = db
        .service
        .create_show(NewShow::new("Log", marker(1, 0), marker(2, 2)))
        .await
        .unwrap();

    db.service.mark_watched(show.id, marker(1, 8)).await.unwrap();
    let latest = db.service.mark_watched(show.id, marker(2, 1)).await.unwrap();
    assert_eq!(latest.current_episode, marker(2, 1));
    assert_eq!(latest.status, ShowStatus::CatchingUp);

    let history = db.service.watch_history(show.id).await.unwrap();
    let episodes: Vec<_> = history.iter().map(|e| e.episode).collect();
    assert_eq!(episodes, [marker(2, 1), marker(1, 8)]);
    assert!(history.iter().all(|e| e.show_id == show.id));
}

#[tokio::test]
async fn next_episode_stays_in_season_and_stops_at_limit() {
    let db = setup().await;

    let show = db
        .service
        .create_show(NewShow::new("Next", marker(3, 9), marker(4, 1)))
        .await
        .unwrap();
    let advanced = db.service.next_episode(show.id).await.unwrap();
    assert_eq!(advanced.current_episode, marker(3, 10));

    let maxed = db
        .service
        .create_show(NewShow::new(
            "Maxed",
            marker(1, EpisodeMarker::MAX_EPISODE),
            marker(1, EpisodeMarker::MAX_EPISODE),
        ))
        .await
        .unwrap();
    assert!(matches!(
        db.service.next_episode(maxed.id).await,
        Err(ShowError::Validation(_))
    ));
}

#[tokio::test]
async fn blank_title_is_rejected_and_nothing_stored() {
    let db = setup().await;

    let result = db
        .service
        .create_show(NewShow::new("  ", marker(1, 1), marker(1, 1)))
        .await;
    assert!(matches!(result, Err(ShowError::Validation(_))));
    assert!(db.service.list_shows(ShowSort::Created).await.unwrap().is_empty());
}

#[tokio::test]
async fn ids_are_unique_and_ordered() {
    let db = setup().await;

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let show = db
            .service
            .create_show(NewShow::new(title, marker(1, 1), marker(1, 1)))
            .await
            .unwrap();
        ids.push(show.id.value());
    }
    db.service.delete_show(ShowId::new(ids[2])).await.unwrap();

    let next = db
        .service
        .create_show(NewShow::new("d", marker(1, 1), marker(1, 1)))
        .await
        .unwrap();
    assert!(next.id.value() > ids[2]);

    let listed: Vec<_> = db
        .service
        .list_shows(ShowSort::Created)
        .await
        .unwrap()
        .iter()
        .map(|s| s.id.value())
        .collect();
    assert_eq!(listed, [ids[0], ids[1], next.id.value()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writes_to_one_show_all_succeed() {
    let db = setup().await;

    let show = db
        .service
        .create_show(NewShow::new("Busy", marker(1, 0), marker(5, 10)))
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for i in 0..40u32 {
        let service = Arc::clone(&db.service);
        let id = show.id;
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                let update = ShowUpdate {
                    title: Some(format!("Busy {i}")),
                    ..ShowUpdate::default()
                };
                service.update_show(id, update).await.map(|_| ())
            } else {
                service.mark_watched(id, marker(1, i)).await.map(|_| ())
            }
        }));
    }

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let history = db.service.watch_history(show.id).await.unwrap();
    assert_eq!(history.len(), 20);

    let stored = db.service.get_show(show.id).await.unwrap();
    assert!(stored.title.starts_with("Busy "));
    assert!(history.iter().any(|e| e.episode == stored.current_episode));
}
