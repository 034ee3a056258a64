//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record owned by the repository.
//! - Provide draft validation shared by save paths.
//!
//! # Invariants
//! - `id` is generated once at creation and never reused for another note.
//! - Titles are display labels only; they are not unique and never used as keys.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Title used when a new note is saved with an empty title.
pub const UNTITLED_TITLE: &str = "Untitled";

/// Stable identifier for every note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// One markdown note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable ID. Legacy records persisted without one get a fresh ID on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: NoteId,
    /// Display title shown in the note list.
    pub title: String,
    /// Raw markdown source text, may be empty.
    pub content: String,
}

impl Note {
    /// Creates a note with a generated stable ID.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns the default title for the note at 1-based `position`.
    pub fn numbered_title(position: usize) -> String {
        format!("Note {position}")
    }
}

/// Validation errors for note drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title and content are both blank after trimming.
    Empty,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "note cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Rejects drafts whose title and content are both whitespace-only.
pub fn validate_draft(title: &str, content: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() && content.trim().is_empty() {
        return Err(NoteValidationError::Empty);
    }
    Ok(())
}

/// Resolves the title stored for a newly created note.
///
/// Only the exact empty string falls back; whitespace titles are kept as typed.
pub fn title_or_untitled(title: &str) -> String {
    if title.is_empty() {
        UNTITLED_TITLE.to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{title_or_untitled, validate_draft, Note, NoteValidationError};

    #[test]
    fn new_notes_get_distinct_ids() {
        let first = Note::new("A", "");
        let second = Note::new("A", "");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn validate_draft_rejects_whitespace_only_fields() {
        assert_eq!(validate_draft("", ""), Err(NoteValidationError::Empty));
        assert_eq!(
            validate_draft("   ", "\n\t"),
            Err(NoteValidationError::Empty)
        );
        assert!(validate_draft("", "body").is_ok());
        assert!(validate_draft("title", "").is_ok());
    }

    #[test]
    fn title_falls_back_only_when_empty() {
        assert_eq!(title_or_untitled(""), "Untitled");
        assert_eq!(title_or_untitled("Groceries"), "Groceries");
        assert_eq!(title_or_untitled("  "), "  ");
    }

    #[test]
    fn legacy_record_without_id_deserializes_with_fresh_id() {
        let note: Note = serde_json::from_str(r#"{"title":"A","content":"x"}"#)
            .expect("legacy note should deserialize");
        assert_eq!(note.title, "A");
        assert_eq!(note.content, "x");
        assert!(!note.id.is_nil());
    }
}
