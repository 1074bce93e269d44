use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{AirDay, EpisodeMarker, Priority, ShowId, ShowStatus, classify};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: ShowId,
    pub title: String,
    pub service: Option<String>,
    pub current_episode: EpisodeMarker,
    pub latest_available_episode: EpisodeMarker,
    pub air_day: Option<AirDay>,
    pub priority: Priority,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Show {
    #[must_use]
    pub fn status(&self) -> ShowStatus {
        classify(self.current_episode, self.latest_available_episode)
    }
}

/// Client-supplied fields for a new show.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewShow {
    pub title: String,
    pub current_episode: EpisodeMarker,
    pub latest_available_episode: EpisodeMarker,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub air_day: Option<AirDay>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewShow {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        current_episode: EpisodeMarker,
        latest_available_episode: EpisodeMarker,
    ) -> Self {
        Self {
            title: title.into(),
            current_episode,
            latest_available_episode,
            service: None,
            air_day: None,
            priority: None,
            notes: None,
        }
    }
}

/// Partial update. `None` leaves a field untouched; for the nullable
/// columns `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShowUpdate {
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub service: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub current_episode: Option<EpisodeMarker>,
    #[serde(default, deserialize_with = "non_null")]
    pub latest_available_episode: Option<EpisodeMarker>,
    #[serde(default, deserialize_with = "present")]
    pub air_day: Option<Option<AirDay>>,
    #[serde(default, deserialize_with = "non_null")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

/// Distinguishes an explicit `null` from a missing key.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Required columns may be omitted from an update but never set to `null`.
fn non_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchEntry {
    pub id: i64,
    pub show_id: ShowId,
    pub episode: EpisodeMarker,
    pub watched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_tells_null_from_missing() {
        let update: ShowUpdate = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(update.notes, Some(None));
        assert_eq!(update.service, None);

        let update: ShowUpdate = serde_json::from_str(r#"{"service": "Max"}"#).unwrap();
        assert_eq!(update.service, Some(Some("Max".to_string())));
    }

    #[test]
    fn update_rejects_null_for_required_fields() {
        for body in [
            r#"{"title": null}"#,
            r#"{"priority": null}"#,
            r#"{"current_episode": null}"#,
            r#"{"latest_available_episode": null}"#,
        ] {
            assert!(serde_json::from_str::<ShowUpdate>(body).is_err(), "{body}");
        }

        let update: ShowUpdate = serde_json::from_str(r#"{"priority": 1}"#).unwrap();
        assert_eq!(update.priority, Some(Priority::new(1).unwrap()));
        assert_eq!(update.title, None);
    }

    #[test]
    fn update_rejects_unknown_and_derived_fields() {
        assert!(serde_json::from_str::<ShowUpdate>(r#"{"status": "catching_up"}"#).is_err());
        assert!(serde_json::from_str::<ShowUpdate>(r#"{"created_at": "2020-01-01"}"#).is_err());
    }

    #[test]
    fn new_show_accepts_string_markers() {
        let new: NewShow = serde_json::from_str(
            r#"{"title": "Foo", "current_episode": "S1E3", "latest_available_episode": {"season": 1, "episode": 5}}"#,
        )
        .unwrap();
        assert_eq!(new.current_episode, EpisodeMarker::new(1, 3).unwrap());
        assert_eq!(new.latest_available_episode, EpisodeMarker::new(1, 5).unwrap());
        assert_eq!(new.priority, None);
    }
}
