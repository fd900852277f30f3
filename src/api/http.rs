//! reqwest-backed implementation of [`Text2SqlService`].
//!
//! No timeouts and no retries: a hung service keeps the calling form in
//! its submitting state until the process exits.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart;
use serde::de::DeserializeOwned;

use super::service::{SchemaUpload, ServiceError, Text2SqlService};
use super::types::{
    ConvertRequest, ErrorBody, HistoryResponse, QueryResult, SessionResponse, SetApiKeyRequest,
};

const SCHEMA_MIME: &str = "application/json";

pub struct HttpService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Sends the request and turns a non-2xx reply into `ServiceError::Api`.
async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ServiceError> {
    let response = request
        .send()
        .await
        .map_err(|e| ServiceError::Network(e.to_string()))?;

    let status = response.status();
    debug!("Service response status: {}", status);
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Service error: {} - {}", status.as_u16(), body);
    Err(ServiceError::Api {
        status: status.as_u16(),
        detail: ErrorBody::detail_from(&body),
    })
}

async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))
}

#[async_trait]
impl Text2SqlService for HttpService {
    async fn set_api_key(&self, api_key: &str, session_id: Option<&str>) -> Result<String, ServiceError> {
        let body = SetApiKeyRequest {
            api_key: api_key.to_string(),
            session_id: session_id.map(str::to_string),
        };
        info!("Registering API key (existing session: {})", session_id.is_some());

        let response = send(self.client.post(self.url("/api/set-api-key")).json(&body)).await?;
        let session: SessionResponse = parse(response).await?;

        info!("Session established: {}", session.session_id);
        Ok(session.session_id)
    }

    async fn upload_schema(&self, session_id: &str, schema: SchemaUpload) -> Result<(), ServiceError> {
        info!(
            "Uploading schema {} ({} bytes) for session {}",
            schema.file_name,
            schema.bytes.len(),
            session_id
        );

        let part = multipart::Part::bytes(schema.bytes)
            .file_name(schema.file_name)
            .mime_str(SCHEMA_MIME)
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("session_id", session_id.to_string());

        let request = self
            .client
            .post(self.url("/api/upload-schema"))
            .query(&[("session_id", session_id)])
            .multipart(form);
        let response = send(request).await?;

        // Any 2xx counts; the body (a SessionResponse) is informational only.
        if let Ok(reply) = parse::<SessionResponse>(response).await {
            debug!("Upload reply: {:?}", reply.message);
        }
        Ok(())
    }

    async fn convert(&self, question: &str, session_id: &str) -> Result<QueryResult, ServiceError> {
        let body = ConvertRequest {
            question: question.to_string(),
            session_id: session_id.to_string(),
        };
        info!("Converting question ({} chars)", question.chars().count());

        let response = send(self.client.post(self.url("/api/convert")).json(&body)).await?;
        let result: QueryResult = parse(response).await?;

        debug!("Generated SQL: {}", result.sql_query);
        Ok(result)
    }

    async fn history(&self, session_id: &str) -> Result<Vec<QueryResult>, ServiceError> {
        let response = send(self.client.get(self.url(&format!("/api/history/{session_id}")))).await?;
        let reply: HistoryResponse = parse(response).await?;

        debug!("Fetched {} history entries", reply.history.len());
        Ok(reply.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let service = HttpService::new("http://localhost:8000/");
        assert_eq!(service.base_url(), "http://localhost:8000");
        assert_eq!(service.url("/api/convert"), "http://localhost:8000/api/convert");
    }
}
