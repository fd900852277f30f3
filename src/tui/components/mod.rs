//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: session, schema and server status
//! - `KeyForm`, `SchemaForm`, `QuestionForm`: the three input panels. They
//!   borrow their persistent `TextField` for the duration of one frame.
//! - `ResultView`, `HistoryList`: paragraphs laid out inside the results
//!   scroll view
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that own local state and emit events:
//! - `TextField`: editable text, emits `FieldEvent`
//! - `SchemaInput`: path field that also turns pastes into drops
//!
//! ## Props-Based Data Flow
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! KeyForm { field: &mut tui.key_field, phase: &app.key, focused, spinner_frame }.render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file, shared status helpers)
//! ├── title_bar.rs
//! ├── text_field.rs
//! ├── key_form.rs
//! ├── schema_form.rs
//! ├── question_form.rs
//! ├── result_view.rs
//! └── history_list.rs
//! ```

pub mod history_list;
pub mod key_form;
pub mod question_form;
pub mod result_view;
pub mod schema_form;
pub mod text_field;
mod title_bar;

pub use history_list::HistoryList;
pub use key_form::KeyForm;
pub use question_form::QuestionForm;
pub use result_view::ResultView;
pub use schema_form::{SchemaEvent, SchemaForm, SchemaInput};
pub use text_field::{FieldEvent, TextField};
pub use title_bar::TitleBar;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::core::form::FormPhase;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

pub(crate) fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    }
}

/// Wrapped row count as a widget height. Saturates instead of wrapping.
pub(crate) fn clamp_rows(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// The inline error or success line under a form's description.
pub(crate) fn status_line(phase: &FormPhase, success: &str) -> Line<'static> {
    match phase {
        FormPhase::Failed(msg) => Line::styled(msg.clone(), Style::default().fg(Color::Red)),
        FormPhase::Succeeded { .. } => Line::styled(success.to_owned(), Style::default().fg(Color::Green)),
        _ => Line::default(),
    }
}
