//! Schema file selection.
//!
//! A file is acceptable when its name maps to the `application/json` media
//! type. Only the name is inspected here; bytes are read when the upload
//! starts.

use std::fmt;
use std::path::{Path, PathBuf};

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// How the user picked the file. The two paths report rejection differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectVia {
    /// Typed a path and pressed Enter.
    Browse,
    /// Dropped the file onto the terminal (arrives as a bracketed paste).
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSelection {
    pub path: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The name doesn't declare a JSON media type.
    NotJson { via: SelectVia, media_type: Option<String> },
    /// Nothing was given.
    Empty { via: SelectVia },
}

impl SchemaError {
    /// The inline message shown under the schema form.
    pub fn user_message(&self) -> &'static str {
        let via = match self {
            SchemaError::NotJson { via, .. } | SchemaError::Empty { via } => via,
        };
        match via {
            SelectVia::Browse => "Please select a valid JSON file",
            SelectVia::Drop => "Please drop a valid JSON file",
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::NotJson { media_type: Some(mt), .. } => {
                write!(f, "expected {JSON_MEDIA_TYPE}, got {mt}")
            }
            SchemaError::NotJson { media_type: None, .. } => {
                write!(f, "expected {JSON_MEDIA_TYPE}, got an unknown type")
            }
            SchemaError::Empty { .. } => write!(f, "no file given"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Media type declared by a file name, if any.
pub fn media_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path).first().map(|m| m.essence_str().to_string())
}

/// Accepts `raw` as a schema file if it names a JSON file.
pub fn select(raw: &str, via: SelectVia) -> Result<SchemaSelection, SchemaError> {
    let path = clean_path(raw);
    if path.as_os_str().is_empty() {
        return Err(SchemaError::Empty { via });
    }

    let media_type = media_type(&path);
    if media_type.as_deref() != Some(JSON_MEDIA_TYPE) {
        return Err(SchemaError::NotJson { via, media_type });
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SchemaSelection { path, file_name })
}

/// Undoes what terminals do to dropped paths: surrounding quotes,
/// `file://` prefixes, and backslash-escaped spaces.
pub fn clean_path(raw: &str) -> PathBuf {
    let mut s = raw.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
        }
    }
    let s = s.strip_prefix("file://").unwrap_or(s);
    PathBuf::from(s.replace("\\ ", " "))
}
