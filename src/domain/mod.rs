//! Domain types for show tracking with strong typing.
//!
//! Everything in here is pure: no database, no I/O. The status rule that
//! splits the dashboard into "ready to watch" and "catching up" lives in
//! [`classify`].

pub mod air_day;
pub mod episode;

pub use air_day::AirDay;
pub use episode::{EpisodeMarker, MarkerError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a tracked show.
///
/// Assigned by the database on insert and never reused.
///
/// # Examples
///
/// ```rust
/// use whatson::domain::ShowId;
///
/// let id = ShowId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ShowId(i32);

impl ShowId {
    /// Creates a new `ShowId` from a raw i32 value.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id` is negative. Production code should validate
    /// before construction.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "ShowId should be non-negative");
        Self(id)
    }

    /// Returns the underlying i32 value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ShowId> for i32 {
    fn from(id: ShowId) -> Self {
        id.0
    }
}

impl From<i32> for ShowId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for ShowId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for ShowId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Derived watch status of a show. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowStatus {
    /// The user is not behind the latest known episode.
    ReadyToWatch,
    /// The user is behind the latest known episode.
    CatchingUp,
}

impl ShowStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadyToWatch => "ready_to_watch",
            Self::CatchingUp => "catching_up",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ReadyToWatch => "Ready to Watch",
            Self::CatchingUp => "Catching Up",
        }
    }
}

impl fmt::Display for ShowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a show from its two episode markers.
///
/// Equal markers, and a current marker ahead of the latest one, both count
/// as ready to watch.
///
/// ```
/// use whatson::domain::{EpisodeMarker, ShowStatus, classify};
///
/// let current = EpisodeMarker::new(1, 3).unwrap();
/// let latest = EpisodeMarker::new(1, 5).unwrap();
/// assert_eq!(classify(current, latest), ShowStatus::CatchingUp);
/// assert_eq!(classify(latest, latest), ShowStatus::ReadyToWatch);
/// ```
#[must_use]
pub fn classify(current: EpisodeMarker, latest: EpisodeMarker) -> ShowStatus {
    if current < latest {
        ShowStatus::CatchingUp
    } else {
        ShowStatus::ReadyToWatch
    }
}

/// Watch priority, 1 being the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const HIGHEST: u8 = 1;
    pub const LOWEST: u8 = 3;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(value: i64) -> Result<Self, String> {
        if (i64::from(Self::HIGHEST)..=i64::from(Self::LOWEST)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(format!(
                "Invalid priority: {value}. Priority must be between {} and {}",
                Self::HIGHEST,
                Self::LOWEST
            ))
        }
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<i64> for Priority {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordering applied to show listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowSort {
    /// Creation order (oldest first).
    #[default]
    Created,
    /// Priority, then air day, then title.
    Priority,
    /// Case-insensitive title.
    Title,
    /// Most recently updated first.
    Updated,
}

impl FromStr for ShowSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "created" | "created_at" => Ok(Self::Created),
            "priority" => Ok(Self::Priority),
            "title" => Ok(Self::Title),
            "updated" | "updated_at" => Ok(Self::Updated),
            other => Err(format!(
                "Unknown sort '{other}'. Expected one of: created, priority, title, updated"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(season: u32, episode: u32) -> EpisodeMarker {
        EpisodeMarker::new(season, episode).unwrap()
    }

    #[test]
    fn show_id_conversions() {
        let id = ShowId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i32::from(id), 42);
        assert_eq!(ShowId::from(42), id);
    }

    #[test]
    fn show_id_serialization() {
        let id = ShowId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let deserialized: ShowId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn behind_is_catching_up() {
        assert_eq!(classify(marker(1, 3), marker(1, 5)), ShowStatus::CatchingUp);
        assert_eq!(classify(marker(1, 9), marker(2, 1)), ShowStatus::CatchingUp);
    }

    #[test]
    fn equal_is_ready() {
        assert_eq!(classify(marker(3, 4), marker(3, 4)), ShowStatus::ReadyToWatch);
    }

    #[test]
    fn ahead_is_ready() {
        assert_eq!(classify(marker(2, 1), marker(1, 10)), ShowStatus::ReadyToWatch);
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ShowStatus::CatchingUp).unwrap(),
            "\"catching_up\""
        );
        assert_eq!(
            serde_json::to_string(&ShowStatus::ReadyToWatch).unwrap(),
            "\"ready_to_watch\""
        );
    }

    #[test]
    fn priority_bounds() {
        assert!(Priority::new(1).is_ok());
        assert!(Priority::new(3).is_ok());
        assert!(Priority::new(0).is_err());
        assert!(Priority::new(4).is_err());
        assert_eq!(Priority::default().value(), 2);
        assert!(serde_json::from_str::<Priority>("5").is_err());
        assert_eq!(serde_json::from_str::<Priority>("1").unwrap().value(), 1);
    }

    #[test]
    fn sort_parsing() {
        assert_eq!("".parse::<ShowSort>().unwrap(), ShowSort::Created);
        assert_eq!("Priority".parse::<ShowSort>().unwrap(), ShowSort::Priority);
        assert_eq!("title".parse::<ShowSort>().unwrap(), ShowSort::Title);
        assert_eq!("updated_at".parse::<ShowSort>().unwrap(), ShowSort::Updated);
        assert!("rating".parse::<ShowSort>().is_err());
    }
}
