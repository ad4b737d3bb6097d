// src/service.rs
//
// Request handlers over the entry store, plus the JSON wire contract they
// are reached through.

use crate::db::Store;
use crate::error::{Result, TlogError};
use crate::models::{LogEntry, LogPatch, NewLog};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Persistence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ServiceError {
    fn validation(message: &str) -> Self {
        Self { kind: ErrorKind::Validation, message: message.to_string() }
    }

    fn not_found() -> Self {
        Self { kind: ErrorKind::NotFound, message: "Log not found".to_string() }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Title is mandatory on update; content and tags are only replaced when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Options for listing. Both default to absent: every entry, unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// A request as it travels over the wire. Ids are kept as the raw path text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Create(CreateLogRequest),
    List(ListQuery),
    Get { id: String },
    Update { id: String, body: UpdateLogRequest },
    Delete { id: String },
}

/// Response envelope shared by every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
            message: None,
            count: None,
        }
    }

    pub fn fail(err: ServiceError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.message),
            kind: Some(err.kind),
            message: None,
            count: None,
        }
    }

    fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

pub struct LogService {
    store: Store,
}

impl LogService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Releases the store. Called once on shutdown.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }

    pub fn create(&self, req: CreateLogRequest) -> ServiceResult<LogEntry> {
        let title = required_title(req.title.as_deref())?;
        let new = NewLog {
            title,
            content: req.content.map(|c| c.trim().to_string()).unwrap_or_default(),
            tags: req.tags.map(clean_tags).unwrap_or_default(),
        };
        self.store
            .insert(&new)
            .map_err(|e| persistence("Failed to create log", e))
    }

    pub fn list(&self, query: &ListQuery) -> ServiceResult<Vec<LogEntry>> {
        let search = query.search.as_deref().filter(|s| !s.is_empty());
        self.store
            .list_all(search, query.limit)
            .map_err(|e| persistence("Failed to fetch logs", e))
    }

    pub fn get(&self, id: &str) -> ServiceResult<LogEntry> {
        let id = parse_id(id)?;
        self.store
            .get_by_id(id)
            .map_err(|e| persistence("Failed to fetch log", e))?
            .ok_or_else(ServiceError::not_found)
    }

    pub fn update(&self, id: &str, req: UpdateLogRequest) -> ServiceResult<LogEntry> {
        let id = parse_id(id)?;
        let patch = LogPatch {
            title: Some(required_title(req.title.as_deref())?),
            content: req.content.map(|c| c.trim().to_string()),
            tags: req.tags.map(clean_tags),
        };
        self.store
            .update(id, &patch)
            .map_err(|e| persistence("Failed to update log", e))?
            .ok_or_else(ServiceError::not_found)
    }

    pub fn delete(&self, id: &str) -> ServiceResult<LogEntry> {
        let id = parse_id(id)?;
        self.store
            .delete(id)
            .map_err(|e| persistence("Failed to delete log", e))?
            .ok_or_else(ServiceError::not_found)
    }

    /// Runs one request and wraps the outcome in the response envelope.
    pub fn handle(&self, request: Request) -> Value {
        match request {
            Request::Create(req) => envelope(self.create(req), Some("Log created successfully")),
            Request::List(query) => match self.list(&query) {
                Ok(logs) => {
                    let count = logs.len();
                    to_value(ApiResponse::ok(logs).with_count(count))
                }
                Err(e) => to_value(ApiResponse::<()>::fail(e)),
            },
            Request::Get { id } => envelope(self.get(&id), None),
            Request::Update { id, body } => {
                envelope(self.update(&id, body), Some("Log updated successfully"))
            }
            Request::Delete { id } => envelope(self.delete(&id), Some("Log deleted successfully")),
        }
    }

    /// Wire entry point: JSON request in, JSON envelope out.
    pub fn dispatch(&self, body: &str) -> String {
        let response = match serde_json::from_str::<Request>(body) {
            Ok(request) => {
                debug!(?request, "dispatching request");
                self.handle(request)
            }
            Err(e) => {
                debug!(error = %e, "rejecting malformed request");
                to_value(ApiResponse::<()>::fail(ServiceError::validation("Malformed request body")))
            }
        };
        response.to_string()
    }
}

fn required_title(title: Option<&str>) -> ServiceResult<String> {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(ServiceError::validation("Title is required")),
    }
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

// Malformed and unknown ids get the same answer.
fn parse_id(raw: &str) -> ServiceResult<i64> {
    raw.trim().parse().map_err(|_| ServiceError::not_found())
}

fn persistence(message: &str, err: TlogError) -> ServiceError {
    error!(error = %err, "{message}");
    ServiceError { kind: ErrorKind::Persistence, message: message.to_string() }
}

fn envelope<T: Serialize>(result: ServiceResult<T>, message: Option<&str>) -> Value {
    match result {
        Ok(data) => {
            let response = ApiResponse::ok(data);
            to_value(match message {
                Some(m) => response.with_message(m),
                None => response,
            })
        }
        Err(e) => to_value(ApiResponse::<()>::fail(e)),
    }
}

fn to_value<T: Serialize>(response: ApiResponse<T>) -> Value {
    serde_json::to_value(response).unwrap_or_else(|e| {
        error!(error = %e, "failed to encode response");
        serde_json::json!({ "success": false, "error": "Failed to encode response" })
    })
}
