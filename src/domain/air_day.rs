use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week a show's new episodes usually land.
///
/// `Weekend` is for shows the user keeps for Saturday/Sunday viewing and
/// sorts alongside Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AirDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Weekend,
}

impl AirDay {
    pub const ALL: [Self; 8] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
        Self::Weekend,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
            Self::Weekend => "Weekend",
        }
    }

    /// Position in the weekly schedule.
    #[must_use]
    pub const fn week_rank(&self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday | Self::Weekend => 6,
        }
    }

    /// Rank for an optional air day; shows without one go last.
    #[must_use]
    pub fn rank(day: Option<Self>) -> u8 {
        day.map_or(99, |d| d.week_rank())
    }
}

impl fmt::Display for AirDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AirDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!("Invalid air day '{wanted}'. Expected a weekday name or 'Weekend'")
            })
    }
}

impl TryFrom<String> for AirDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AirDay> for String {
    fn from(day: AirDay) -> Self {
        day.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("thursday".parse::<AirDay>().unwrap(), AirDay::Thursday);
        assert_eq!(" WEEKEND ".parse::<AirDay>().unwrap(), AirDay::Weekend);
        assert!("Someday".parse::<AirDay>().is_err());
    }

    #[test]
    fn weekend_sorts_with_sunday_and_missing_last() {
        assert_eq!(AirDay::Weekend.week_rank(), AirDay::Sunday.week_rank());
        assert!(AirDay::rank(Some(AirDay::Monday)) < AirDay::rank(Some(AirDay::Friday)));
        assert!(AirDay::rank(Some(AirDay::Weekend)) < AirDay::rank(None));
    }

    #[test]
    fn serde_uses_canonical_names() {
        let day: AirDay = serde_json::from_str("\"tuesday\"").unwrap();
        assert_eq!(serde_json::to_string(&day).unwrap(), "\"Tuesday\"");
    }
}
