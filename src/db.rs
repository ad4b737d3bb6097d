// src/db.rs

use crate::error::{Result, TlogError};
use crate::models::{format_timestamp, LogEntry, LogPatch, NewLog};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, info};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    tags TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL
)";

const COLUMNS: &str = "id, title, content, tags, created_at";

/// Durable, ordered collection of log entries backed by SQLite.
///
/// Ids come from `AUTOINCREMENT`, so they only ever grow, even after the
/// highest row has been deleted.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database at `path`, creating parent directories
    /// and migrating older schemas as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening log store");
        Self::init(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;

        // Databases created by the title-only client lack content and tags.
        for (column, ddl) in [
            ("content", "ALTER TABLE logs ADD COLUMN content TEXT NOT NULL DEFAULT ''"),
            ("tags", "ALTER TABLE logs ADD COLUMN tags TEXT NOT NULL DEFAULT '[]'"),
        ] {
            let exists: bool = conn.query_row(
                "SELECT COUNT(*) FROM pragma_table_info('logs') WHERE name = ?1",
                [column],
                |row| row.get::<_, i64>(0).map(|count| count > 0),
            )?;
            if !exists {
                info!(column, "migrating logs table");
                conn.execute(ddl, [])?;
            }
        }

        Ok(Self { conn })
    }

    /// Inserts a new entry stamped with the current time.
    pub fn insert(&self, new: &NewLog) -> Result<LogEntry> {
        self.insert_at(new, Utc::now())
    }

    pub fn insert_at(&self, new: &NewLog, created_at: DateTime<Utc>) -> Result<LogEntry> {
        let tags = serde_json::to_string(&new.tags)?;
        let entry = self.conn.query_row(
            &format!(
                "INSERT INTO logs (title, content, tags, created_at) VALUES (?1, ?2, ?3, ?4)
                 RETURNING {COLUMNS}"
            ),
            params![new.title, new.content, tags, format_timestamp(&created_at)],
            map_entry,
        )?;
        info!(id = entry.id, "log inserted");
        Ok(entry)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<LogEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM logs WHERE id = ?1"),
                [id],
                map_entry,
            )
            .optional()?;
        Ok(entry)
    }

    /// Lists entries oldest first. `search` keeps only titles containing the
    /// fragment (case-sensitive); `limit` keeps the first N results.
    pub fn list_all(&self, search: Option<&str>, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        // A negative LIMIT means "no limit" to SQLite.
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        debug!(?search, limit, "listing logs");

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM logs
             WHERE ?1 IS NULL OR instr(title, ?1) > 0
             ORDER BY datetime(created_at) ASC, id ASC
             LIMIT ?2"
        ))?;
        let logs = stmt
            .query_map(params![search, limit], map_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    /// Applies `patch` to an existing entry. Returns `None` when no row has `id`.
    pub fn update(&self, id: i64, patch: &LogPatch) -> Result<Option<LogEntry>> {
        let tags = patch
            .tags
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let entry = self
            .conn
            .query_row(
                &format!(
                    "UPDATE logs SET
                        title = COALESCE(?1, title),
                        content = COALESCE(?2, content),
                        tags = COALESCE(?3, tags)
                     WHERE id = ?4
                     RETURNING {COLUMNS}"
                ),
                params![patch.title, patch.content, tags, id],
                map_entry,
            )
            .optional()?;
        if entry.is_some() {
            info!(id, "log updated");
        }
        Ok(entry)
    }

    /// Removes an entry, returning it. Returns `None` when no row has `id`.
    pub fn delete(&self, id: i64) -> Result<Option<LogEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("DELETE FROM logs WHERE id = ?1 RETURNING {COLUMNS}"),
                [id],
                map_entry,
            )
            .optional()?;
        if entry.is_some() {
            info!(id, "log deleted");
        }
        Ok(entry)
    }

    #[cfg(test)]
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Closes the underlying connection, surfacing any error SQLite reports.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| TlogError::Persistence(e))
    }
}

fn map_entry(row: &Row<'_>) -> rusqlite::Result<LogEntry> {
    let tags_json: String = row.get(3)?;
    let tags = serde_json::from_str(&tags_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok(LogEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        tags,
        created_at: row.get(4)?,
    })
}
