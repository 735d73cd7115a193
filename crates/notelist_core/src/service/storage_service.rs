//! Storage service: the durable CRUD boundary over notes.
//!
//! # Responsibility
//! - Provide the four calls the presentation layer relies on
//!   (`fetch_all`, `create`, `update`, `delete`).
//! - Translate repository failures into the storage error taxonomy.
//!
//! # Invariants
//! - Blank titles are rejected before any repository call.
//! - A mutation is durable once the call returns `Ok`.
//! - Write failures are returned to the caller; they never end the process.
//! - Logged events carry ids and counts only, never titles.

use crate::model::note::{validate_title, Note, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure taxonomy of the storage service.
#[derive(Debug)]
pub enum StorageError {
    /// The store could not be queried.
    ReadFailed(RepoError),
    /// The store could not persist a mutation.
    WriteFailed(RepoError),
    /// Update/delete targeted an identity absent from the store.
    NotFound(NoteId),
    /// Title rejected before reaching the store.
    ValidationFailed(NoteValidationError),
    /// A write succeeded but its read-back did not match.
    InconsistentState(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed(err) => write!(f, "failed to read notes: {err}"),
            Self::WriteFailed(err) => write!(f, "failed to save note: {err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::ValidationFailed(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadFailed(err) | Self::WriteFailed(err) => Some(err),
            Self::ValidationFailed(err) => Some(err),
            Self::NotFound(_) | Self::InconsistentState(_) => None,
        }
    }
}

impl From<NoteValidationError> for StorageError {
    fn from(value: NoteValidationError) -> Self {
        Self::ValidationFailed(value)
    }
}

impl StorageError {
    /// Stable machine-readable code for logs and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReadFailed(_) => "read_failed",
            Self::WriteFailed(_) => "write_failed",
            Self::NotFound(_) => "not_found",
            Self::ValidationFailed(_) => "validation_failed",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }

    fn from_read(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::ReadFailed(other),
        }
    }

    fn from_write(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::ValidationFailed(err),
            other => Self::WriteFailed(other),
        }
    }
}

/// Storage service over a repository implementation.
///
/// Constructed explicitly and handed to whoever coordinates the list; there is
/// no process-wide instance.
pub struct StorageService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> StorageService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns every persisted note. Order is unspecified.
    pub fn fetch_all(&self) -> StorageResult<Vec<Note>> {
        match self.repo.list_notes() {
            Ok(notes) => {
                debug!(
                    "event=notes_fetch module=storage status=ok count={}",
                    notes.len()
                );
                Ok(notes)
            }
            Err(err) => {
                error!(
                    "event=notes_fetch module=storage status=error error_code=read_failed error={}",
                    err
                );
                Err(StorageError::ReadFailed(err))
            }
        }
    }

    /// Persists a new note with a fresh identity and returns it.
    ///
    /// # Errors
    /// - `ValidationFailed` for a blank title; the store is not touched.
    /// - `WriteFailed` when the insert cannot be persisted.
    /// - `InconsistentState` when the inserted row is absent on read-back.
    ///
    /// A read-back that fails after the insert committed returns the note as
    /// constructed.
    pub fn create(&self, title: &str) -> StorageResult<Note> {
        validate_title(title)?;

        let note = Note::new(title);
        let id = self.repo.create_note(&note).map_err(|err| {
            log_write_error("note_create", None, &err);
            StorageError::from_write(err)
        })?;

        // The insert is committed; a failed read-back must not report failure.
        let stored = match self.repo.get_note(id) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                return Err(StorageError::InconsistentState(
                    "created note not found in read-back",
                ))
            }
            Err(err) => {
                warn!(
                    "event=note_create module=storage status=degraded note_id={id} error_code=read_back_failed error={err}"
                );
                note
            }
        };

        info!("event=note_create module=storage status=ok note_id={id}");
        Ok(stored)
    }

    /// Replaces the title of the note with the given identity.
    ///
    /// # Errors
    /// - `ValidationFailed` for a blank title; the store is not touched.
    /// - `NotFound` when no note has this identity.
    /// - `WriteFailed` when the update cannot be persisted.
    pub fn update(&self, id: NoteId, new_title: &str) -> StorageResult<()> {
        validate_title(new_title)?;

        self.repo.update_title(id, new_title).map_err(|err| {
            log_write_error("note_update", Some(id), &err);
            StorageError::from_write(err)
        })?;

        info!("event=note_update module=storage status=ok note_id={id}");
        Ok(())
    }

    /// Erases the note with the given identity.
    ///
    /// Repeating a delete reports `NotFound`; it is not idempotent.
    pub fn delete(&self, id: NoteId) -> StorageResult<()> {
        self.repo.delete_note(id).map_err(|err| {
            log_write_error("note_delete", Some(id), &err);
            StorageError::from_write(err)
        })?;

        info!("event=note_delete module=storage status=ok note_id={id}");
        Ok(())
    }
}

fn log_write_error(event: &str, id: Option<NoteId>, err: &RepoError) {
    let note_id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
    match err {
        RepoError::NotFound(_) => warn!(
            "event={event} module=storage status=error note_id={note_id} error_code=not_found"
        ),
        other => error!(
            "event={event} module=storage status=error note_id={note_id} error_code=write_failed error={other}"
        ),
    }
}
