//! `YYYY-MM` dates used by work and education entries

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

static YEAR_MONTH_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").ok());

/// A calendar month in the backend's `YYYY-MM` format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, type = "string"))]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    /// Build a year-month, rejecting months outside 1..=12 and years past 9999.
    pub fn new(year: u16, month: u8) -> Option<Self> {
        ((1..=12).contains(&month) && year <= 9999).then_some(Self { year, month })
    }

    /// The current local year-month.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        // chrono months are always 1..=12 and years of the running clock fit u16
        Self {
            year: u16::try_from(today.year()).unwrap_or(9999),
            month: u8::try_from(today.month()).unwrap_or(1),
        }
    }

    pub const fn year(self) -> u16 {
        self.year
    }

    pub const fn month(self) -> u8 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error returned when a string is not a valid `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Date must be YYYY-MM, got {0:?}")]
pub struct YearMonthError(pub String);

impl FromStr for YearMonth {
    type Err = YearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || YearMonthError(s.to_string());
        let matches = YEAR_MONTH_RE.as_ref().is_some_and(|re| re.is_match(s));
        if !matches {
            return Err(invalid());
        }
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// End of a work entry as the user edits it
///
/// The backend has no notion of an ongoing role and requires `end_date`, so
/// [`WorkEnd::Ongoing`] is sent as the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkEnd {
    Ended(YearMonth),
    Ongoing,
}

impl WorkEnd {
    /// Date sent on the wire.
    pub fn to_wire(self) -> YearMonth {
        match self {
            Self::Ended(date) => date,
            Self::Ongoing => YearMonth::current(),
        }
    }

    pub const fn is_ongoing(self) -> bool {
        matches!(self, Self::Ongoing)
    }
}

impl From<YearMonth> for WorkEnd {
    fn from(date: YearMonth) -> Self {
        Self::Ended(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_exactly() {
        let date: YearMonth = "2024-01".parse().unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.to_string(), "2024-01");
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-01\"");
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["2024-1", "24-01", "2024/01", "2024-13", "2024-00", "2024-01-05", ""] {
            assert!(bad.parse::<YearMonth>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn serde_round_trips_wire_string() {
        let parsed: YearMonth = serde_json::from_str("\"1999-12\"").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"1999-12\"");
        assert!(serde_json::from_str::<YearMonth>("\"1999-1\"").is_err());
    }

    #[test]
    fn ongoing_serializes_as_current_month() {
        let wire = WorkEnd::Ongoing.to_wire();
        assert_eq!(wire, YearMonth::current());
        assert!(WorkEnd::Ongoing.is_ongoing());

        let ended = YearMonth::new(2020, 6).unwrap();
        assert_eq!(WorkEnd::from(ended).to_wire(), ended);
    }

    #[test]
    fn ordering_follows_calendar() {
        let a = YearMonth::new(2023, 12).unwrap();
        let b = YearMonth::new(2024, 1).unwrap();
        assert!(a < b);
    }
}
