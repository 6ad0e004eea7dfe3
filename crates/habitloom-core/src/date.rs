//! Calendar-day utilities.
//!
//! A *day-key* is a [`NaiveDate`] in the local timezone. Everything above this
//! module compares completions by day-key only, so time-of-day never matters.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};

/// Normalize a timestamp to its local calendar day.
pub fn day_key(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Today's day-key according to the wall clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Signed number of days from `from` to `to` (positive when `to` is later).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Shift a day-key by `days` (negative moves into the past).
pub fn add_days(day: NaiveDate, days: i64) -> NaiveDate {
    day + Duration::days(days)
}

/// Weekday index with 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(day: NaiveDate) -> u8 {
    day.weekday().num_days_from_sunday() as u8
}

/// Position of a weekday index within a displayed week.
pub fn week_position(index: u8, monday_first: bool) -> u8 {
    if monday_first {
        (index + 6) % 7
    } else {
        index
    }
}

/// Short English label for a weekday index.
pub fn weekday_label(index: u8) -> &'static str {
    match index {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "?",
    }
}

/// Parse a stored completion date.
///
/// Accepts a plain `YYYY-MM-DD` day-key or a full RFC 3339 timestamp, which
/// is normalized to the local calendar day.
pub fn parse_day_key(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| day_key(ts.with_timezone(&Utc)))
}

/// Serde adapter for a list of day-keys.
pub mod day_keys {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(days: &[NaiveDate], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        days.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| {
                super::parse_day_key(s)
                    .ok_or_else(|| de::Error::custom(format!("invalid completion date: {s}")))
            })
            .collect()
    }
}

/// Serde adapter for an optional day-key.
pub mod opt_day_key {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(day: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        day.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) => super::parse_day_key(&s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date: {s}"))),
        }
    }
}
