//! System clipboard access for the result viewer.
//!
//! Failures never reach the screen; they become `CopyFinished(Err)`,
//! which `update()` only logs.

use std::fmt;

use log::debug;

use crate::core::action::Action;

#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardError(pub String);

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard error: {}", self.0)
    }
}

impl std::error::Error for ClipboardError {}

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard. Opened lazily so headless sessions start fine.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ClipboardError(e.to_string())),
            None => Err(ClipboardError("clipboard not initialised".to_string())),
        }
    }
}

/// Writes `text` and reports the outcome as an action.
pub fn copy(sink: &mut dyn ClipboardSink, text: &str) -> Action {
    debug!("Copying {} bytes to clipboard", text.len());
    Action::CopyFinished(sink.set_text(text).map_err(|e| e.to_string()))
}
