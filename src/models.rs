// src/models.rs

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of `created_at` as written by the store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Entries are shown in Istanbul time, which has been a fixed UTC+03:00 since 2016.
const DISPLAY_OFFSET_SECS: i32 = 3 * 3600;
const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Format SQLite's `CURRENT_TIMESTAMP` default produces, found in older databases.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
}

impl LogEntry {
    /// Parses `created_at`, accepting both RFC 3339 and the legacy SQLite form.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Creation time for humans; falls back to the stored text if it does not parse.
    pub fn created_display(&self) -> String {
        self.created_at_utc()
            .map(|dt| display_time(&dt))
            .unwrap_or_else(|| self.created_at.clone())
    }
}

/// Fields supplied when inserting a new entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLog {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Fields to overwrite on update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

pub fn display_time(dt: &DateTime<Utc>) -> String {
    match FixedOffset::east_opt(DISPLAY_OFFSET_SECS) {
        Some(offset) => dt.with_timezone(&offset).format(DISPLAY_FORMAT).to_string(),
        None => dt.format(DISPLAY_FORMAT).to_string(),
    }
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, LEGACY_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Splits a comma-separated tag string, trimming pieces and dropping empty ones.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
