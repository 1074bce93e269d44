//! Season/episode position markers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("Invalid episode marker '{0}'. Expected a form like S1E3 or S01E03")]
    Malformed(String),

    #[error("Invalid season {0}. Season must be between 1 and {max}", max = EpisodeMarker::MAX_SEASON)]
    SeasonOutOfRange(i64),

    #[error("Invalid episode {0}. Episode must be between 0 and {max}", max = EpisodeMarker::MAX_EPISODE)]
    EpisodeOutOfRange(i64),
}

/// A position in a show, ordered season first, then episode.
///
/// Episode 0 means nothing has been watched in that season yet.
///
/// ```
/// use whatson::domain::EpisodeMarker;
///
/// let a: EpisodeMarker = "S1E9".parse().unwrap();
/// let b: EpisodeMarker = "s02e01".parse().unwrap();
/// assert!(a < b);
/// assert_eq!(b.to_string(), "S02E01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MarkerInput")]
pub struct EpisodeMarker {
    season: u32,
    episode: u32,
}

/// Wire forms accepted for a marker: `{"season": 1, "episode": 3}` or `"S1E3"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum MarkerInput {
    Parts { season: i64, episode: i64 },
    Text(String),
}

impl TryFrom<MarkerInput> for EpisodeMarker {
    type Error = MarkerError;

    fn try_from(input: MarkerInput) -> Result<Self, Self::Error> {
        match input {
            MarkerInput::Parts { season, episode } => Self::from_parts(season, episode),
            MarkerInput::Text(text) => text.parse(),
        }
    }
}

impl EpisodeMarker {
    pub const MAX_SEASON: u32 = 9999;
    pub const MAX_EPISODE: u32 = 9999;

    pub fn new(season: u32, episode: u32) -> Result<Self, MarkerError> {
        Self::from_parts(i64::from(season), i64::from(episode))
    }

    /// Validates raw integers, e.g. columns read back from the database.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_parts(season: i64, episode: i64) -> Result<Self, MarkerError> {
        if !(1..=i64::from(Self::MAX_SEASON)).contains(&season) {
            return Err(MarkerError::SeasonOutOfRange(season));
        }
        if !(0..=i64::from(Self::MAX_EPISODE)).contains(&episode) {
            return Err(MarkerError::EpisodeOutOfRange(episode));
        }

        Ok(Self {
            season: season as u32,
            episode: episode as u32,
        })
    }

    #[must_use]
    pub const fn season(&self) -> u32 {
        self.season
    }

    #[must_use]
    pub const fn episode(&self) -> u32 {
        self.episode
    }

    /// The following episode in the same season, if still in range.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        if self.episode >= Self::MAX_EPISODE {
            return None;
        }
        Some(Self {
            season: self.season,
            episode: self.episode + 1,
        })
    }
}

impl Default for EpisodeMarker {
    fn default() -> Self {
        Self {
            season: 1,
            episode: 0,
        }
    }
}

impl fmt::Display for EpisodeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^S(?P<season>\d{1,4})\s*E(?P<episode>\d{1,4})$")
            .expect("Invalid regex pattern defined in code")
    })
}

impl FromStr for EpisodeMarker {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = marker_regex()
            .captures(trimmed)
            .ok_or_else(|| MarkerError::Malformed(trimmed.to_string()))?;

        let season = caps["season"]
            .parse::<i64>()
            .map_err(|_| MarkerError::Malformed(trimmed.to_string()))?;
        let episode = caps["episode"]
            .parse::<i64>()
            .map_err(|_| MarkerError::Malformed(trimmed.to_string()))?;

        Self::from_parts(season, episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(season: u32, episode: u32) -> EpisodeMarker {
        EpisodeMarker::new(season, episode).unwrap()
    }

    #[test]
    fn orders_season_before_episode() {
        assert!(marker(1, 10) < marker(2, 1));
        assert!(marker(2, 1) < marker(2, 2));
        assert_eq!(marker(3, 3).cmp(&marker(3, 3)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!("S1E3".parse::<EpisodeMarker>().unwrap(), marker(1, 3));
        assert_eq!("s01e03".parse::<EpisodeMarker>().unwrap(), marker(1, 3));
        assert_eq!("  S12 E104 ".parse::<EpisodeMarker>().unwrap(), marker(12, 104));
        assert_eq!("S2E0".parse::<EpisodeMarker>().unwrap(), marker(2, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "episode three".parse::<EpisodeMarker>(),
            Err(MarkerError::Malformed(_))
        ));
        assert!("1x03".parse::<EpisodeMarker>().is_err());
        assert!("S1".parse::<EpisodeMarker>().is_err());
        assert!("".parse::<EpisodeMarker>().is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            "S0E1".parse::<EpisodeMarker>(),
            Err(MarkerError::SeasonOutOfRange(0))
        );
        assert_eq!(
            EpisodeMarker::from_parts(1, -1),
            Err(MarkerError::EpisodeOutOfRange(-1))
        );
        assert!(EpisodeMarker::from_parts(10_000, 1).is_err());
    }

    #[test]
    fn deserializes_object_and_string() {
        let from_object: EpisodeMarker =
            serde_json::from_str(r#"{"season": 1, "episode": 5}"#).unwrap();
        let from_text: EpisodeMarker = serde_json::from_str(r#""S01E05""#).unwrap();
        assert_eq!(from_object, from_text);

        assert!(serde_json::from_str::<EpisodeMarker>(r#"{"season": 0, "episode": 5}"#).is_err());
        assert!(serde_json::from_str::<EpisodeMarker>(r#""five""#).is_err());
        assert!(serde_json::from_str::<EpisodeMarker>("5").is_err());
    }

    #[test]
    fn serializes_as_object() {
        let json = serde_json::to_value(marker(2, 7)).unwrap();
        assert_eq!(json, serde_json::json!({"season": 2, "episode": 7}));
    }

    #[test]
    fn next_stays_in_season() {
        assert_eq!(marker(1, 3).next(), Some(marker(1, 4)));
        assert_eq!(marker(1, EpisodeMarker::MAX_EPISODE).next(), None);
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(marker(1, 3).to_string(), "S01E03");
        assert_eq!(marker(25, 120).to_string(), "S25E120");
    }
}
