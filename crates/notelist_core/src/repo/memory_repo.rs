//! In-process note repository.
//!
//! Holds notes in memory with switchable read/write faults so callers can
//! exercise storage failure paths without a real database.

use crate::model::note::{validate_title, Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use std::cell::{Cell, RefCell};

/// Volatile repository backed by a `Vec` in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: RefCell<Vec<Note>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent reads fail with `RepoError::Unavailable`.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Makes subsequent writes fail with `RepoError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of stored notes, ignoring injected faults.
    pub fn len(&self) -> usize {
        self.notes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.borrow().is_empty()
    }

    fn check_read(&self) -> RepoResult<()> {
        if self.fail_reads.get() {
            return Err(RepoError::Unavailable("read fault injected"));
        }
        Ok(())
    }

    fn check_write(&self) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::Unavailable("write fault injected"));
        }
        Ok(())
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;
        self.check_write()?;

        let mut notes = self.notes.borrow_mut();
        if notes.iter().any(|existing| existing.id == note.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate note id `{}`",
                note.id
            )));
        }
        notes.push(note.clone());
        Ok(note.id)
    }

    fn update_title(&self, id: NoteId, title: &str) -> RepoResult<()> {
        validate_title(title)?;
        self.check_write()?;

        let mut notes = self.notes.borrow_mut();
        let note = notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(RepoError::NotFound(id))?;
        note.title = title.to_string();
        Ok(())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.check_read()?;
        Ok(self.notes.borrow().iter().find(|note| note.id == id).cloned())
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        self.check_read()?;
        Ok(self.notes.borrow().clone())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        self.check_write()?;

        let mut notes = self.notes.borrow_mut();
        let position = notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(RepoError::NotFound(id))?;
        notes.remove(position);
        Ok(())
    }
}
