//! # Actions
//!
//! Everything that can happen in the client becomes an `Action`.
//! User submits a key? That's `Action::SubmitApiKey(key)`.
//! The service answers? That's `Action::ApiKeyRegistered(result)`.
//!
//! `update()` applies an action to the state and returns the single
//! `Effect` the shell must carry out (spawn a request, copy text, quit).
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Local validation lives here too, so a rejected submit is visible as
//! `Effect::None` plus a `Failed` phase: no request ever leaves.

use std::time::Instant;

use log::{debug, info, warn};

use crate::api::{QueryResult, ServiceError};
use crate::core::form::{COPIED_FLASH, FormPhase, SUCCESS_FLASH};
use crate::core::schema::{self, SchemaSelection, SelectVia};
use crate::core::state::App;

pub const MSG_KEY_EMPTY: &str = "Please enter an API key";
pub const MSG_KEY_FAILED: &str = "Failed to set API key";
pub const MSG_NO_FILE: &str = "Please select a file first";
pub const MSG_NO_SESSION: &str = "Please set API key first";
pub const MSG_UPLOAD_FAILED: &str = "Failed to upload schema";
pub const MSG_QUESTION_EMPTY: &str = "Please enter a question";
pub const MSG_QUESTION_LOCKED: &str = "Please set API key and upload schema first";
pub const MSG_CONVERT_FAILED: &str = "Failed to convert query";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SubmitApiKey(String),
    ApiKeyRegistered(Result<String, ServiceError>),
    SelectSchema { raw: String, via: SelectVia },
    UploadSchema,
    SchemaUploaded(Result<(), ServiceError>),
    /// The selected file couldn't be read when the upload started.
    SchemaUnreadable(String),
    SubmitQuestion(String),
    QuestionConverted(Result<QueryResult, ServiceError>),
    HistoryFetched {
        session_id: String,
        result: Result<Vec<QueryResult>, ServiceError>,
    },
    CopyResult,
    CopyFinished(Result<(), String>),
    Tick(Instant),
    Quit,
}

/// A call to the service, with everything it needs captured up front.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    RegisterKey {
        api_key: String,
        session_id: Option<String>,
    },
    UploadSchema {
        session_id: String,
        selection: SchemaSelection,
    },
    Convert {
        question: String,
        session_id: String,
    },
    FetchHistory {
        session_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Spawn(Request),
    /// The question was answered; empty the input field.
    ClearQuestionInput,
    CopyToClipboard(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitApiKey(api_key) => {
            if app.key_locked() {
                debug!("Ignoring key submit: form locked ({:?})", app.key);
                return Effect::None;
            }
            if api_key.trim().is_empty() {
                app.key.fail(MSG_KEY_EMPTY);
                return Effect::None;
            }
            app.key = FormPhase::Submitting;
            Effect::Spawn(Request::RegisterKey {
                api_key,
                session_id: app.session_id.clone(),
            })
        }
        Action::ApiKeyRegistered(Ok(session_id)) => {
            app.key.succeed(Instant::now(), SUCCESS_FLASH);
            let changed = app.session_id.as_deref() != Some(session_id.as_str());
            app.session_id = Some(session_id.clone());
            if changed {
                info!("Session changed to {}, fetching history", session_id);
                Effect::Spawn(Request::FetchHistory { session_id })
            } else {
                Effect::None
            }
        }
        Action::ApiKeyRegistered(Err(e)) => {
            warn!("Key registration failed: {}", e);
            // Rejections never show the service's detail on this form.
            let message = match e {
                ServiceError::Api { .. } => MSG_KEY_FAILED.to_string(),
                other => other.user_message(MSG_KEY_FAILED),
            };
            app.key.fail(message);
            Effect::None
        }
        Action::SelectSchema { raw, via } => {
            if app.schema_locked() {
                return Effect::None;
            }
            match schema::select(&raw, via) {
                Ok(selection) => {
                    debug!("Schema selected: {}", selection.path.display());
                    app.schema.selected = Some(selection);
                    app.schema.phase = Default::default();
                }
                Err(e) => {
                    debug!("Schema rejected ({:?}): {}", via, e);
                    app.schema.phase.fail(e.user_message());
                    if via == SelectVia::Browse {
                        app.schema.selected = None;
                    }
                }
            }
            Effect::None
        }
        Action::UploadSchema => {
            if app.schema.phase.is_submitting() || app.schema.phase.is_succeeded() {
                return Effect::None;
            }
            let Some(selection) = app.schema.selected.clone() else {
                app.schema.phase.fail(MSG_NO_FILE);
                return Effect::None;
            };
            let Some(session_id) = app.session_id.clone() else {
                app.schema.phase.fail(MSG_NO_SESSION);
                return Effect::None;
            };
            app.schema.phase = FormPhase::Submitting;
            Effect::Spawn(Request::UploadSchema { session_id, selection })
        }
        Action::SchemaUploaded(Ok(())) => {
            app.schema.phase.succeed(Instant::now(), SUCCESS_FLASH);
            app.schema_loaded = true;
            Effect::None
        }
        Action::SchemaUploaded(Err(e)) => {
            warn!("Schema upload failed: {}", e);
            app.schema.phase.fail(e.user_message(MSG_UPLOAD_FAILED));
            Effect::None
        }
        Action::SchemaUnreadable(reason) => {
            warn!("Schema file unreadable: {}", reason);
            app.schema.phase.fail(reason);
            Effect::None
        }
        Action::SubmitQuestion(question) => {
            if app.question.is_submitting() {
                return Effect::None;
            }
            if question.trim().is_empty() {
                app.question.fail(MSG_QUESTION_EMPTY);
                return Effect::None;
            }
            let (Some(session_id), true) = (app.session_id.clone(), app.schema_loaded) else {
                app.question.fail(MSG_QUESTION_LOCKED);
                return Effect::None;
            };
            app.question = FormPhase::Submitting;
            Effect::Spawn(Request::Convert { question, session_id })
        }
        Action::QuestionConverted(Ok(result)) => {
            app.question = Default::default();
            app.copy = Default::default();
            app.history.push_front(result.clone());
            app.current_result = Some(result);
            Effect::ClearQuestionInput
        }
        Action::QuestionConverted(Err(e)) => {
            warn!("Conversion failed: {}", e);
            app.question.fail(e.user_message(MSG_CONVERT_FAILED));
            Effect::None
        }
        Action::HistoryFetched { session_id, result } => {
            if app.session_id.as_deref() != Some(session_id.as_str()) {
                debug!("Discarding history for inactive session {}", session_id);
                return Effect::None;
            }
            match result {
                Ok(items) => {
                    info!("History replaced with {} fetched entries", items.len());
                    app.history.replace(items);
                }
                Err(e) => warn!("Failed to fetch history: {}", e),
            }
            Effect::None
        }
        Action::CopyResult => match &app.current_result {
            Some(result) => Effect::CopyToClipboard(result.sql_query.clone()),
            None => Effect::None,
        },
        Action::CopyFinished(Ok(())) => {
            app.copy.succeed(Instant::now(), COPIED_FLASH);
            Effect::None
        }
        Action::CopyFinished(Err(e)) => {
            warn!("Failed to copy: {}", e);
            Effect::None
        }
        Action::Tick(now) => {
            app.key.tick(now);
            app.schema.phase.tick(now);
            app.copy.tick(now);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
