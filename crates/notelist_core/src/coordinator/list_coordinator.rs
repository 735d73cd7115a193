//! List coordinator: in-memory display order mirrored against storage.
//!
//! # Responsibility
//! - Hold the ordered note sequence the view renders.
//! - Run create/update/delete flows against storage and signal the view.
//!
//! # Invariants
//! - Every mutation reaches storage before the in-memory list changes.
//! - A failed storage call leaves the in-memory list untouched.
//! - Display order is insertion order; storage order is ignored past load.
//! - Blank titles are dropped without touching storage or the list.

use crate::model::note::{validate_title, Note};
use crate::repo::note_repo::NoteRepository;
use crate::service::storage_service::{StorageError, StorageService};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROMPT_MESSAGE: &str = "Write down your note";
const PROMPT_PLACEHOLDER: &str = "Note";

/// View-layer sink for list change signals.
///
/// Each signal describes exactly one row change; `reloaded` replaces all rows.
pub trait ListObserver {
    fn reloaded(&mut self, _count: usize) {}
    fn inserted(&mut self, _index: usize) {}
    fn refreshed(&mut self, _index: usize) {}
    fn removed(&mut self, _index: usize) {}
}

/// Observer that ignores every signal.
impl ListObserver for () {}

/// Errors from list flows.
#[derive(Debug)]
pub enum ListError {
    /// Position does not address a row of the current list.
    IndexOutOfRange { index: usize, len: usize },
    /// Storage rejected the flow; the list is unchanged.
    Storage(StorageError),
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "list position {index} out of range (len {len})")
            }
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<StorageError> for ListError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Dialog context shown when collecting a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPrompt {
    pub heading: &'static str,
    pub message: &'static str,
    pub placeholder: &'static str,
    /// Current title when editing an existing row.
    pub prefill: Option<String>,
}

/// Ordered in-memory mirror of the note store.
pub struct ListCoordinator<'s, R: NoteRepository, O: ListObserver> {
    storage: &'s StorageService<R>,
    observer: O,
    notes: Vec<Note>,
}

impl<'s, R: NoteRepository, O: ListObserver> ListCoordinator<'s, R, O> {
    /// Creates an empty coordinator; call `load` to populate it.
    pub fn new(storage: &'s StorageService<R>, observer: O) -> Self {
        Self {
            storage,
            observer,
            notes: Vec::new(),
        }
    }

    /// Replaces the list with the store contents, in the order received.
    ///
    /// Read failures are absorbed: the error is logged, the list is left empty
    /// and the view still receives `reloaded(0)`.
    pub fn load(&mut self) -> usize {
        match self.storage.fetch_all() {
            Ok(notes) => {
                self.notes = notes;
                info!(
                    "event=list_load module=coordinator status=ok count={}",
                    self.notes.len()
                );
            }
            Err(err) => {
                error!(
                    "event=list_load module=coordinator status=error error_code={} error={}",
                    err.code(),
                    err
                );
                self.notes.clear();
            }
        }

        let count = self.notes.len();
        self.observer.reloaded(count);
        count
    }

    /// Creates a note and appends it at the end of the list.
    ///
    /// Returns the new position, or `None` when a blank title was dropped.
    pub fn create(&mut self, title: &str) -> Result<Option<usize>, ListError> {
        if validate_title(title).is_err() {
            debug!("event=list_create module=coordinator status=skipped reason=blank_title");
            return Ok(None);
        }

        let note = self.storage.create(title)?;
        self.notes.push(note);
        let index = self.notes.len() - 1;
        self.observer.inserted(index);
        Ok(Some(index))
    }

    /// Retitles the note at `index`; identity and position stay stable.
    ///
    /// Returns `false` when a blank title was dropped.
    pub fn update(&mut self, index: usize, title: &str) -> Result<bool, ListError> {
        let id = self.note_at(index)?.id;
        if validate_title(title).is_err() {
            debug!("event=list_update module=coordinator status=skipped reason=blank_title");
            return Ok(false);
        }

        self.storage.update(id, title)?;
        self.notes[index].title = title.to_string();
        self.observer.refreshed(index);
        Ok(true)
    }

    /// Deletes the note at `index` from storage, then from the list.
    pub fn delete(&mut self, index: usize) -> Result<Note, ListError> {
        let id = self.note_at(index)?.id;

        self.storage.delete(id)?;
        let removed = self.notes.remove(index);
        self.observer.removed(index);
        Ok(removed)
    }

    /// Dialog context for a new note (`None`) or for editing row `index`.
    pub fn edit_prompt(&self, index: Option<usize>) -> Result<EditPrompt, ListError> {
        let prefill = match index {
            Some(index) => Some(self.note_at(index)?.title.clone()),
            None => None,
        };
        let heading = if prefill.is_some() {
            "Update Note"
        } else {
            "New Note"
        };
        Ok(EditPrompt {
            heading,
            message: PROMPT_MESSAGE,
            placeholder: PROMPT_PLACEHOLDER,
            prefill,
        })
    }

    /// Number of rows in the list.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the list has no rows.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Note at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    /// Titles in display order.
    pub fn titles(&self) -> Vec<&str> {
        self.notes.iter().map(|note| note.title.as_str()).collect()
    }

    /// Borrows the view-layer observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn note_at(&self, index: usize) -> Result<&Note, ListError> {
        self.notes.get(index).ok_or(ListError::IndexOutOfRange {
            index,
            len: self.notes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ListCoordinator, ListError, ListObserver};
    use crate::repo::memory_repo::InMemoryNoteRepository;
    use crate::service::storage_service::{StorageError, StorageService};

    #[derive(Debug, Default)]
    struct Signals(Vec<String>);

    impl ListObserver for Signals {
        fn reloaded(&mut self, count: usize) {
            self.0.push(format!("reloaded:{count}"));
        }
        fn inserted(&mut self, index: usize) {
            self.0.push(format!("inserted:{index}"));
        }
        fn refreshed(&mut self, index: usize) {
            self.0.push(format!("refreshed:{index}"));
        }
        fn removed(&mut self, index: usize) {
            self.0.push(format!("removed:{index}"));
        }
    }

    #[test]
    fn each_flow_emits_exactly_one_signal() {
        let storage = StorageService::new(InMemoryNoteRepository::new());
        let mut list = ListCoordinator::new(&storage, Signals::default());

        list.load();
        list.create("A").unwrap();
        list.create("B").unwrap();
        list.update(0, "A2").unwrap();
        list.delete(1).unwrap();

        assert_eq!(
            list.observer().0,
            vec![
                "reloaded:0",
                "inserted:0",
                "inserted:1",
                "refreshed:0",
                "removed:1"
            ]
        );
        assert_eq!(list.titles(), vec!["A2"]);
    }

    #[test]
    fn failed_delete_keeps_row_and_emits_nothing() {
        let storage = StorageService::new(InMemoryNoteRepository::new());
        let mut list = ListCoordinator::new(&storage, Signals::default());
        list.create("keep me").unwrap();

        storage.repository().set_fail_writes(true);
        let err = list.delete(0).unwrap_err();

        assert!(matches!(err, ListError::Storage(StorageError::WriteFailed(_))));
        assert_eq!(list.titles(), vec!["keep me"]);
        assert_eq!(list.observer().0, vec!["inserted:0"]);
        assert_eq!(storage.repository().len(), 1);
    }

    #[test]
    fn create_keeps_list_in_step_with_store_when_read_back_fails() {
        let storage = StorageService::new(InMemoryNoteRepository::new());
        let mut list = ListCoordinator::new(&storage, Signals::default());

        storage.repository().set_fail_reads(true);
        assert_eq!(list.create("Groceries").unwrap(), Some(0));

        assert_eq!(list.len(), storage.repository().len());
        assert_eq!(list.titles(), vec!["Groceries"]);
        assert_eq!(list.observer().0, vec!["inserted:0"]);
    }

    #[test]
    fn failed_update_keeps_old_title() {
        let storage = StorageService::new(InMemoryNoteRepository::new());
        let mut list = ListCoordinator::new(&storage, ());
        list.create("before").unwrap();

        storage.repository().set_fail_writes(true);
        assert!(list.update(0, "after").is_err());
        assert_eq!(list.titles(), vec!["before"]);
    }

    #[test]
    fn blank_update_is_dropped_without_refresh() {
        let storage = StorageService::new(InMemoryNoteRepository::new());
        let mut list = ListCoordinator::new(&storage, Signals::default());
        list.create("stay").unwrap();

        assert!(!list.update(0, "").unwrap());
        assert_eq!(list.titles(), vec!["stay"]);
        assert_eq!(list.observer().0, vec!["inserted:0"]);
    }

    #[test]
    fn out_of_range_position_is_reported() {
        let storage = StorageService::new(InMemoryNoteRepository::new());
        let mut list = ListCoordinator::new(&storage, ());

        let err = list.delete(3).unwrap_err();
        assert!(matches!(
            err,
            ListError::IndexOutOfRange { index: 3, len: 0 }
        ));
        assert!(list.update(0, "x").is_err());
    }

    #[test]
    fn edit_prompt_prefills_current_title() {
        let storage = StorageService::new(InMemoryNoteRepository::new());
        let mut list = ListCoordinator::new(&storage, ());
        list.create("Groceries").unwrap();

        let new_prompt = list.edit_prompt(None).unwrap();
        assert_eq!(new_prompt.heading, "New Note");
        assert_eq!(new_prompt.prefill, None);

        let edit_prompt = list.edit_prompt(Some(0)).unwrap();
        assert_eq!(edit_prompt.heading, "Update Note");
        assert_eq!(edit_prompt.placeholder, "Note");
        assert_eq!(edit_prompt.prefill.as_deref(), Some("Groceries"));
    }
}
