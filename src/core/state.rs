//! # Application State
//!
//! Everything the client knows, owned in one place and handed to the
//! renderer by reference. Nothing here survives a restart.
//!
//! ```text
//! App
//! ├── session_id: Option<String>     // issued by the service, replaced wholesale
//! ├── schema_loaded: bool            // false until an upload succeeds, never reset
//! ├── current_result: Option<QueryResult>
//! ├── history: History               // newest first, at most 5
//! ├── key: FormPhase                 // key registration form
//! ├── schema: SchemaForm             // selection + upload form
//! ├── question: FormPhase            // question form
//! └── copy: FormPhase                // result viewer's copy action
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::QueryResult;
use crate::core::form::FormPhase;
use crate::core::history::History;
use crate::core::schema::SchemaSelection;

#[derive(Debug, Default)]
pub struct SchemaForm {
    pub phase: FormPhase,
    pub selected: Option<SchemaSelection>,
}

#[derive(Debug, Default)]
pub struct App {
    pub session_id: Option<String>,
    pub schema_loaded: bool,
    pub current_result: Option<QueryResult>,
    pub history: History,
    pub key: FormPhase,
    pub schema: SchemaForm,
    pub question: FormPhase,
    pub copy: FormPhase,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_session(&self) -> bool {
        self.session_id.is_some()
    }

    /// The question form accepts input once both preconditions hold.
    pub fn question_unlocked(&self) -> bool {
        self.has_session() && self.schema_loaded
    }

    /// Key input is locked while a registration is in flight or just succeeded.
    pub fn key_locked(&self) -> bool {
        self.key.is_submitting() || self.key.is_succeeded()
    }

    /// Schema selection is locked while an upload is in flight.
    pub fn schema_locked(&self) -> bool {
        self.schema.phase.is_submitting()
    }

    /// Any form waiting on the service.
    pub fn is_busy(&self) -> bool {
        self.key.is_submitting() || self.schema.phase.is_submitting() || self.question.is_submitting()
    }
}
