use notelist_core::db::open_db_in_memory;
use notelist_core::{
    InMemoryNoteRepository, ListCoordinator, ListError, ListObserver, NoteRepository,
    SqliteNoteRepository, StorageError, StorageService,
};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Signal {
    Reloaded(usize),
    Inserted(usize),
    Refreshed(usize),
    Removed(usize),
}

#[derive(Debug, Default)]
struct Recorder(Vec<Signal>);

impl ListObserver for Recorder {
    fn reloaded(&mut self, count: usize) {
        self.0.push(Signal::Reloaded(count));
    }
    fn inserted(&mut self, index: usize) {
        self.0.push(Signal::Inserted(index));
    }
    fn refreshed(&mut self, index: usize) {
        self.0.push(Signal::Refreshed(index));
    }
    fn removed(&mut self, index: usize) {
        self.0.push(Signal::Removed(index));
    }
}

fn stored_titles<R: NoteRepository>(storage: &StorageService<R>) -> HashSet<String> {
    storage
        .fetch_all()
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect()
}

#[test]
fn create_appends_single_note() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let mut list = ListCoordinator::new(&storage, Recorder::default());
    list.load();

    assert_eq!(list.create("Groceries").unwrap(), Some(0));

    assert_eq!(list.titles(), vec!["Groceries"]);
    let stored = storage.fetch_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Groceries");
    assert_eq!(stored[0].id, list.notes()[0].id);
}

#[test]
fn update_keeps_display_order() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let mut list = ListCoordinator::new(&storage, Recorder::default());

    list.create("A").unwrap();
    list.create("B").unwrap();
    let id_of_a = list.notes()[0].id;
    assert!(list.update(0, "A2").unwrap());

    assert_eq!(
        stored_titles(&storage),
        HashSet::from(["A2".to_string(), "B".to_string()])
    );
    assert_eq!(list.titles(), vec!["A2", "B"]);
    assert_eq!(list.notes()[0].id, id_of_a);
    assert_eq!(list.observer().0.last(), Some(&Signal::Refreshed(0)));
}

#[test]
fn delete_empties_list_and_store() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let mut list = ListCoordinator::new(&storage, Recorder::default());

    list.create("X").unwrap();
    let removed = list.delete(0).unwrap();

    assert_eq!(removed.title, "X");
    assert!(list.is_empty());
    assert!(storage.fetch_all().unwrap().is_empty());
    assert_eq!(
        list.observer().0,
        vec![Signal::Inserted(0), Signal::Removed(0)]
    );
}

#[test]
fn blank_create_is_dropped_silently() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let mut list = ListCoordinator::new(&storage, Recorder::default());
    list.create("existing").unwrap();

    assert_eq!(list.create("").unwrap(), None);
    assert_eq!(list.create("   ").unwrap(), None);

    assert_eq!(list.len(), 1);
    assert_eq!(storage.fetch_all().unwrap().len(), 1);
    assert_eq!(list.observer().0, vec![Signal::Inserted(0)]);
}

#[test]
fn unknown_identity_update_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    storage.create("untouched").unwrap();

    let unknown = Uuid::new_v4();
    let err = storage.update(unknown, "Y").unwrap_err();

    assert!(matches!(err, StorageError::NotFound(id) if id == unknown));
    assert_eq!(
        stored_titles(&storage),
        HashSet::from(["untouched".to_string()])
    );
}

#[test]
fn load_replaces_list_with_store_contents() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    storage.create("one").unwrap();
    storage.create("two").unwrap();

    let mut list = ListCoordinator::new(&storage, Recorder::default());
    assert_eq!(list.load(), 2);

    let listed: HashSet<&str> = list.titles().into_iter().collect();
    assert_eq!(listed, HashSet::from(["one", "two"]));
    assert_eq!(list.observer().0, vec![Signal::Reloaded(2)]);
}

#[test]
fn failed_load_yields_empty_list_without_error() {
    let storage = StorageService::new(InMemoryNoteRepository::new());
    storage.create("hidden").unwrap();
    storage.repository().set_fail_reads(true);

    let mut list = ListCoordinator::new(&storage, Recorder::default());
    assert_eq!(list.load(), 0);

    assert!(list.is_empty());
    assert_eq!(list.observer().0, vec![Signal::Reloaded(0)]);
}

#[test]
fn note_deleted_behind_the_list_surfaces_not_found_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let mut list = ListCoordinator::new(&storage, Recorder::default());
    list.create("stale").unwrap();

    storage.delete(list.notes()[0].id).unwrap();

    let err = list.delete(0).unwrap_err();
    assert!(matches!(err, ListError::Storage(StorageError::NotFound(_))));
    assert_eq!(list.titles(), vec!["stale"]);

    let err = list.update(0, "renamed").unwrap_err();
    assert!(matches!(err, ListError::Storage(StorageError::NotFound(_))));
    assert_eq!(list.titles(), vec!["stale"]);
}

#[test]
fn list_matches_store_after_mixed_flows() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let mut list = ListCoordinator::new(&storage, ());
    list.load();

    for title in ["a", "b", "c", "d"] {
        list.create(title).unwrap();
    }
    list.delete(1).unwrap();
    list.update(2, "d2").unwrap();
    list.create("e").unwrap();
    list.delete(0).unwrap();

    assert_eq!(list.titles(), vec!["c", "d2", "e"]);
    let in_memory: HashSet<(Uuid, String)> = list
        .notes()
        .iter()
        .map(|note| (note.id, note.title.clone()))
        .collect();
    let durable: HashSet<(Uuid, String)> = storage
        .fetch_all()
        .unwrap()
        .into_iter()
        .map(|note| (note.id, note.title))
        .collect();
    assert_eq!(in_memory, durable);
}
