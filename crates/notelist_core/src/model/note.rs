//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the note list.
//! - Own title validation shared by repository and service layers.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `title` is never blank once persisted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable, store-assigned identifier of a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Validation failures for note write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record: identity plus user-editable title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable ID used to target updates and deletes.
    pub id: NoteId,
    /// User-visible title, stored exactly as entered.
    pub title: String,
}

impl Note {
    /// Creates a new note with a generated stable ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by import and test paths where identity already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Checks write-path invariants.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank after trimming.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_title(self.title.as_str())
    }
}

/// Checks a candidate title without constructing a note.
pub fn validate_title(title: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    Ok(())
}
