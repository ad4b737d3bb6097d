// src/config.rs

use crate::error::{Result, TlogError};
use std::path::PathBuf;

/// Environment variable naming the database file; `--db` takes precedence.
pub const DB_ENV: &str = "TLOG_DB";

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub verbosity: u8,
}

impl Config {
    /// `db` is whatever clap collected from `--db` or `TLOG_DB`; when absent the
    /// database lives at `~/.config/tlog/tlog.db`.
    pub fn resolve(db: Option<PathBuf>, verbosity: u8) -> Result<Self> {
        let db_path = match db {
            Some(path) => path,
            None => default_db_path()?,
        };
        Ok(Self { db_path, verbosity })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(TlogError::HomeDirNotFound)?;
    Ok(home_dir.join(".config/tlog/tlog.db"))
}

/// Log filter for a `-v` count, used when `RUST_LOG` is unset.
pub fn log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
