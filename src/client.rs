// src/client.rs

use crate::error::{Result, TlogError};
use crate::models::LogEntry;
use crate::service::{
    ApiResponse, CreateLogRequest, ErrorKind, ListQuery, LogService, Request, UpdateLogRequest,
};
use serde::de::DeserializeOwned;

/// What the terminal side needs from the log service.
pub trait LogClient {
    fn create(&self, req: CreateLogRequest) -> Result<LogEntry>;
    fn list(&self, query: ListQuery) -> Result<Vec<LogEntry>>;
    fn get(&self, id: &str) -> Result<LogEntry>;
    fn update(&self, id: &str, req: UpdateLogRequest) -> Result<LogEntry>;
    fn delete(&self, id: &str) -> Result<LogEntry>;
}

/// Talks to an in-process [`LogService`] through its JSON wire contract.
pub struct LocalClient<'a> {
    service: &'a LogService,
}

impl<'a> LocalClient<'a> {
    pub fn new(service: &'a LogService) -> Self {
        Self { service }
    }

    fn call<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let body = serde_json::to_string(&request)
            .map_err(|e| TlogError::Transport(format!("could not encode request: {e}")))?;
        let raw = self.service.dispatch(&body);
        let response: ApiResponse<T> = serde_json::from_str(&raw)
            .map_err(|e| TlogError::Transport(format!("unreadable response: {e}")))?;
        into_result(response)
    }
}

impl LogClient for LocalClient<'_> {
    fn create(&self, req: CreateLogRequest) -> Result<LogEntry> {
        self.call(Request::Create(req))
    }

    fn list(&self, query: ListQuery) -> Result<Vec<LogEntry>> {
        self.call(Request::List(query))
    }

    fn get(&self, id: &str) -> Result<LogEntry> {
        self.call(Request::Get { id: id.to_string() })
    }

    fn update(&self, id: &str, req: UpdateLogRequest) -> Result<LogEntry> {
        self.call(Request::Update {
            id: id.to_string(),
            body: req,
        })
    }

    fn delete(&self, id: &str) -> Result<LogEntry> {
        self.call(Request::Delete { id: id.to_string() })
    }
}

/// Turns an envelope into a tagged result.
pub fn into_result<T>(response: ApiResponse<T>) -> Result<T> {
    if response.success {
        return response
            .data
            .ok_or_else(|| TlogError::Transport("response carried no data".to_string()));
    }
    let message = response.error.unwrap_or_else(|| "Request failed".to_string());
    Err(match response.kind {
        Some(ErrorKind::Validation) => TlogError::Validation(message),
        Some(ErrorKind::NotFound) => TlogError::NotFound(message),
        Some(ErrorKind::Persistence) => TlogError::Service(message),
        None => TlogError::Transport(message),
    })
}
