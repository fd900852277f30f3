use std::fmt;

use async_trait::async_trait;

use super::types::QueryResult;

/// Errors that can occur while talking to the text-to-SQL service.
/// None of them are retried; each one ends the user action that caused it.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Transport failure (DNS, connection refused, reset mid-body).
    Network(String),
    /// The service answered with a non-2xx status.
    /// `detail` is the body's `detail` field, when it had one.
    Api { status: u16, detail: Option<String> },
    /// A 2xx reply whose body didn't have the expected shape.
    Parse(String),
}

impl ServiceError {
    /// The inline status text for this error.
    ///
    /// Rejections show the service's `detail` or `fallback`; transport and
    /// parse failures show their own text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Api { detail, .. } => detail.clone().unwrap_or_else(|| fallback.to_string()),
            ServiceError::Network(msg) | ServiceError::Parse(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Api { status, detail: Some(detail) } => {
                write!(f, "service error (HTTP {status}): {detail}")
            }
            ServiceError::Api { status, detail: None } => write!(f, "service error (HTTP {status})"),
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// A schema file ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The remote text-to-SQL service, one method per endpoint.
#[async_trait]
pub trait Text2SqlService: Send + Sync {
    /// `POST /api/set-api-key`. Returns the session id the service issued.
    async fn set_api_key(&self, api_key: &str, session_id: Option<&str>) -> Result<String, ServiceError>;

    /// `POST /api/upload-schema?session_id=…` as multipart.
    async fn upload_schema(&self, session_id: &str, schema: SchemaUpload) -> Result<(), ServiceError>;

    /// `POST /api/convert`.
    async fn convert(&self, question: &str, session_id: &str) -> Result<QueryResult, ServiceError>;

    /// `GET /api/history/{session_id}`.
    async fn history(&self, session_id: &str) -> Result<Vec<QueryResult>, ServiceError>;
}
