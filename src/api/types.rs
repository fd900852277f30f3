//! Wire types for the text-to-SQL service's HTTP+JSON surface.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/set-api-key`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SetApiKeyRequest {
    pub api_key: String,
    /// Sent as `null` when no session exists yet, letting the service mint one.
    pub session_id: Option<String>,
}

/// Reply of `POST /api/set-api-key` and `POST /api/upload-schema`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SessionResponse {
    pub session_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/convert`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    pub question: String,
    pub session_id: String,
}

/// One natural-language-to-SQL conversion.
///
/// Fields the client doesn't know about are kept in `extra` so a result
/// round-trips through the client unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub question: String,
    pub sql_query: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A parsed service timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timestamp {
    /// Carried an offset; converted to the local zone.
    Zoned(DateTime<Local>),
    /// No offset given (the service emits these); shown as-is.
    Naive(NaiveDateTime),
}

impl Timestamp {
    fn naive(&self) -> NaiveDateTime {
        match self {
            Timestamp::Zoned(dt) => dt.naive_local(),
            Timestamp::Naive(dt) => *dt,
        }
    }
}

impl QueryResult {
    pub fn new(question: impl Into<String>, sql_query: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            sql_query: sql_query.into(),
            timestamp: timestamp.into(),
            extra: Map::new(),
        }
    }

    /// Parses `timestamp` as RFC 3339 first, then as a naive ISO-8601 date-time.
    pub fn parsed_timestamp(&self) -> Option<Timestamp> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(Timestamp::Zoned(dt.with_timezone(&Local)));
        }
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(Timestamp::Naive)
    }

    /// Date and time, for the result viewer. Falls back to the raw string.
    pub fn display_datetime(&self) -> String {
        self.parsed_timestamp()
            .map(|ts| ts.naive().format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }

    /// Time of day only, for history entries. Falls back to the raw string.
    pub fn display_time(&self) -> String {
        self.parsed_timestamp()
            .map(|ts| ts.naive().format("%H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }
}

/// Reply of `GET /api/history/{session_id}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryResponse {
    pub history: Vec<QueryResult>,
}

/// Optional body of a non-2xx reply.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Extracts `detail` from a raw error body, if it is JSON and carries one.
    pub fn detail_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.is_empty())
    }
}
