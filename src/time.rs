//! Timestamps as delivered by DAWA.
//!
//! Files and API responses carry local Copenhagen time without an offset
//! (`2000-02-05T20:17:59.000`). Values that have passed through a generic
//! encoder arrive as RFC 3339 instead, so parsing accepts both. Rendering
//! always produces RFC 3339 with an explicit offset.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::{Europe::Copenhagen, Tz};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fixed-width layout used by DAWA exports, always in Copenhagen local time.
pub const DAWA_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to parse time {text:?}: expected {DAWA_TIME_FORMAT} or RFC 3339")]
pub struct TimeFormatError {
    pub text: String,
}

/// An instant in the Europe/Copenhagen zone.
///
/// Equality, ordering and hashing follow the underlying instant, so two
/// values rendered with different offsets still compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DawaTime(DateTime<Tz>);

impl DawaTime {
    /// Parses the DAWA layout first and falls back to RFC 3339.
    pub fn parse(text: &str) -> Result<Self, TimeFormatError> {
        let trimmed = text.trim_matches(|c: char| c == '"' || c == ' ');
        Self::parse_local(trimmed)
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|t| Self(t.with_timezone(&Copenhagen)))
            })
            .ok_or_else(|| TimeFormatError {
                text: text.to_string(),
            })
    }

    fn parse_local(text: &str) -> Option<Self> {
        let naive = NaiveDateTime::parse_from_str(text, DAWA_TIME_FORMAT).ok()?;
        let local = match Copenhagen.from_local_datetime(&naive) {
            LocalResult::Single(t) => t,
            LocalResult::Ambiguous(earliest, _) => earliest,
            // Inside the spring-forward gap: keep the pre-transition offset.
            LocalResult::None => Copenhagen
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()?,
        };
        Some(Self(local))
    }

    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self(instant.with_timezone(&Copenhagen))
    }

    /// Seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.0
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }
}

/// The Unix epoch, used for records whose timestamps were absent.
impl Default for DawaTime {
    fn default() -> Self {
        Self(Copenhagen.from_utc_datetime(&NaiveDateTime::default()))
    }
}

impl fmt::Display for DawaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl FromStr for DawaTime {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DawaTime> for DateTime<Utc> {
    fn from(value: DawaTime) -> Self {
        value.0.with_timezone(&Utc)
    }
}

impl Serialize for DawaTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for DawaTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
