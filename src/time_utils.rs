// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps and `mm:ss` durations.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Format a timestamp for storage.
///
/// Fixed-width (microseconds, `Z`) so that text ordering in SQL matches
/// chronological ordering.
pub fn format_storage_timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored RFC3339 timestamp back into UTC.
pub fn parse_storage_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

/// Error returned when a duration string is not canonical `mm:ss`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration {0:?}: expected mm:ss")]
pub struct ParseDurationError(String);

/// A whole-second duration exchanged as `"mm:ss"` text.
///
/// Minutes are zero-padded to two digits and may grow past 99; seconds are
/// always two digits below 60. Only the canonical spelling parses, so
/// `parse(format(s)) == s` and `format(parse(t)) == t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MmSs(u32);

impl MmSs {
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    pub const fn seconds(self) -> u32 {
        self.0
    }

    /// Decode a nullable integer column. Negative values are not durations.
    pub fn from_column(value: Option<i64>) -> Option<Self> {
        value.and_then(|v| u32::try_from(v).ok()).map(Self)
    }

    /// Encode for a nullable integer column. Absence stays `NULL`, never 0.
    pub fn to_column(value: Option<Self>) -> Option<i64> {
        value.map(|d| i64::from(d.0))
    }
}

impl fmt::Display for MmSs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for MmSs {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDurationError(s.to_string());

        let (minutes, seconds) = s.split_once(':').ok_or_else(invalid)?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(minutes) || !all_digits(seconds) {
            return Err(invalid());
        }
        if minutes.len() < 2 || (minutes.len() > 2 && minutes.starts_with('0')) {
            return Err(invalid());
        }
        if seconds.len() != 2 {
            return Err(invalid());
        }

        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
        if seconds >= 60 {
            return Err(invalid());
        }

        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for MmSs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MmSs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_values() {
        assert_eq!(MmSs::from_seconds(0).to_string(), "00:00");
        assert_eq!(MmSs::from_seconds(125).to_string(), "02:05");
        assert_eq!(MmSs::from_seconds(59).to_string(), "00:59");
        assert_eq!(MmSs::from_seconds(6000).to_string(), "100:00");
    }

    #[test]
    fn test_parse_known_values() {
        assert_eq!("02:05".parse::<MmSs>().unwrap().seconds(), 125);
        assert_eq!("00:00".parse::<MmSs>().unwrap().seconds(), 0);
        assert_eq!("100:00".parse::<MmSs>().unwrap().seconds(), 6000);
    }

    #[test]
    fn test_seconds_round_trip() {
        for seconds in (0..20_000).chain([u32::MAX / 60 * 60, 359_999]) {
            let text = MmSs::from_seconds(seconds).to_string();
            assert_eq!(text.parse::<MmSs>().unwrap().seconds(), seconds, "{text}");
        }
    }

    #[test]
    fn test_text_round_trip() {
        for text in ["00:00", "00:01", "02:05", "10:59", "99:59", "100:00", "1234:30"] {
            assert_eq!(text.parse::<MmSs>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_rejects_non_canonical_text() {
        for text in [
            "", "5:03", "05:3", "05:60", "005:00", "ab:cd", "05", "05:03:00", "-1:00", " 05:03",
            "05:+3",
        ] {
            assert!(text.parse::<MmSs>().is_err(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn test_column_mapping_keeps_absence() {
        assert_eq!(MmSs::from_column(None), None);
        assert_eq!(MmSs::from_column(Some(0)), Some(MmSs::from_seconds(0)));
        assert_eq!(MmSs::from_column(Some(-5)), None);
        assert_eq!(MmSs::to_column(None), None);
        assert_eq!(MmSs::to_column(Some(MmSs::from_seconds(90))), Some(90));
    }

    #[test]
    fn test_serde_as_text() {
        let json = serde_json::to_string(&Some(MmSs::from_seconds(125))).unwrap();
        assert_eq!(json, "\"02:05\"");

        let parsed: Option<MmSs> = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, None);

        assert!(serde_json::from_str::<MmSs>("\"2:5\"").is_err());
    }

    #[test]
    fn test_storage_timestamp_orders_as_text() {
        let a = chrono::DateTime::from_timestamp(1_704_103_200, 5_000).unwrap();
        let b = chrono::DateTime::from_timestamp(1_704_103_200, 120_000_000).unwrap();
        let (ta, tb) = (format_storage_timestamp(a), format_storage_timestamp(b));
        assert!(ta < tb);
        assert_eq!(parse_storage_timestamp(&ta).unwrap(), a);
    }
}
