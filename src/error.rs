// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TlogError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying store failed while running an operation.
    #[error("Database Error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    /// A required field was missing or blank.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The service could not be reached or answered without a usable body.
    #[error("Transport Error: {0}")]
    Transport(String),

    /// The service reported a failure of its own (e.g. a store error).
    #[error("{0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, TlogError>;
