//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{QueryResult, SchemaUpload, ServiceError, Text2SqlService};
use crate::tui::clipboard::{ClipboardError, ClipboardSink};

/// A service that records each call and answers from canned replies.
pub struct RecordingService {
    calls: Mutex<Vec<String>>,
    session_id: Mutex<Result<String, ServiceError>>,
    history: Mutex<Result<Vec<QueryResult>, ServiceError>>,
}

impl Default for RecordingService {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            session_id: Mutex::new(Ok("test-session".to_string())),
            history: Mutex::new(Ok(Vec::new())),
        }
    }
}

impl RecordingService {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_history(&self, reply: Result<Vec<QueryResult>, ServiceError>) {
        *self.history.lock().unwrap() = reply;
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Text2SqlService for RecordingService {
    async fn set_api_key(&self, api_key: &str, session_id: Option<&str>) -> Result<String, ServiceError> {
        self.record(format!("set-api-key {} {}", api_key, session_id.unwrap_or("-")));
        self.session_id.lock().unwrap().clone()
    }

    async fn upload_schema(&self, session_id: &str, schema: SchemaUpload) -> Result<(), ServiceError> {
        self.record(format!("upload-schema {} {}", session_id, schema.file_name));
        Ok(())
    }

    async fn convert(&self, question: &str, session_id: &str) -> Result<QueryResult, ServiceError> {
        self.record(format!("convert {} {}", session_id, question));
        Ok(QueryResult::new(question, "SELECT 1;", "2025-01-01T00:00:00"))
    }

    async fn history(&self, session_id: &str) -> Result<Vec<QueryResult>, ServiceError> {
        self.record(format!("history {}", session_id));
        self.history.lock().unwrap().clone()
    }
}

/// A clipboard that always refuses.
pub struct BrokenClipboard;

impl ClipboardSink for BrokenClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError("clipboard unavailable".to_string()))
    }
}

/// A clipboard that remembers what it was given.
#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
