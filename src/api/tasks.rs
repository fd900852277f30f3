//! Runs one `Request` against the service and reports back as an `Action`.
//!
//! The TUI spawns each call on its own tokio task; the returned action is
//! fed through `update()` like any user input.

use std::sync::Arc;

use log::{debug, info};

use crate::api::service::{SchemaUpload, Text2SqlService};
use crate::core::action::{Action, Request};
use crate::core::schema::SchemaSelection;

pub async fn run_request(service: Arc<dyn Text2SqlService>, request: Request) -> Action {
    match request {
        Request::RegisterKey { api_key, session_id } => {
            Action::ApiKeyRegistered(service.set_api_key(&api_key, session_id.as_deref()).await)
        }
        Request::UploadSchema { session_id, selection } => match read_schema(&selection).await {
            Ok(upload) => Action::SchemaUploaded(service.upload_schema(&session_id, upload).await),
            Err(reason) => Action::SchemaUnreadable(reason),
        },
        Request::Convert { question, session_id } => {
            Action::QuestionConverted(service.convert(&question, &session_id).await)
        }
        Request::FetchHistory { session_id } => {
            let result = service.history(&session_id).await;
            Action::HistoryFetched { session_id, result }
        }
    }
}

async fn read_schema(selection: &SchemaSelection) -> Result<SchemaUpload, String> {
    debug!("Reading schema file {}", selection.path.display());
    let bytes = tokio::fs::read(&selection.path)
        .await
        .map_err(|e| format!("Could not read {}: {}", selection.file_name, e))?;
    info!("Read {} bytes from {}", bytes.len(), selection.path.display());
    Ok(SchemaUpload {
        file_name: selection.file_name.clone(),
        bytes,
    })
}
