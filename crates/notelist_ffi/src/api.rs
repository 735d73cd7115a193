//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the four storage calls (fetch/create/update/delete) to Dart via FRB.
//! - Keep error semantics simple envelopes for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Blank titles are rejected before any storage call.
//! - Note ids cross the boundary as canonical UUID strings.

use log::warn;
use notelist_core::db::open_db;
use notelist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, Note, NoteId, SqliteNoteRepository, StorageError, StorageService,
};
use std::path::PathBuf;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Note row as rendered by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    /// Stable note ID in string form.
    pub note_id: String,
    pub title: String,
}

/// Response envelope for `notes_fetch_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub ok: bool,
    /// Stored notes; empty on failure.
    pub items: Vec<NoteItem>,
    /// Human-readable message for diagnostics.
    pub message: String,
}

/// Response envelope for create/update/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether the mutation is durable.
    pub ok: bool,
    /// Affected note, present on success of create/update.
    pub item: Option<NoteItem>,
    /// Stable error code (`not_found`, `write_failed`, ...) on failure.
    pub error_code: Option<String>,
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, item: Option<NoteItem>) -> Self {
        Self {
            ok: true,
            item,
            error_code: None,
            message: message.into(),
        }
    }

    fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            error_code: Some(code.to_string()),
            message: message.into(),
        }
    }
}

/// Lists all stored notes.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Read failures return `ok=false` with an empty list; the UI shows nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_fetch_all() -> NoteListResponse {
    match with_storage(|storage| storage.fetch_all()) {
        Ok(notes) => NoteListResponse {
            ok: true,
            message: format!("Loaded {} note(s).", notes.len()),
            items: notes.into_iter().map(to_note_item).collect(),
        },
        Err(failure) => NoteListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("notes_fetch_all failed: {}", failure.message),
        },
    }
}

/// Creates a note with the given title.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(title: String) -> NoteActionResponse {
    if title.trim().is_empty() {
        return NoteActionResponse::failure("validation_failed", "Title must not be blank.");
    }
    match with_storage(|storage| storage.create(title.as_str())) {
        Ok(note) => NoteActionResponse::success("Note created.", Some(to_note_item(note))),
        Err(failure) => failure.into_action("note_create"),
    }
}

/// Replaces the title of the note with `note_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(note_id: String, title: String) -> NoteActionResponse {
    if title.trim().is_empty() {
        return NoteActionResponse::failure("validation_failed", "Title must not be blank.");
    }
    let id = match parse_note_id(note_id.as_str()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_storage(|storage| storage.update(id, title.as_str())) {
        Ok(()) => NoteActionResponse::success(
            "Note updated.",
            Some(to_note_item(Note::with_id(id, title))),
        ),
        Err(failure) => failure.into_action("note_update"),
    }
}

/// Deletes the note with `note_id`.
///
/// The caller removes the row from its list only when `ok` is true.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> NoteActionResponse {
    let id = match parse_note_id(note_id.as_str()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_storage(|storage| storage.delete(id)) {
        Ok(()) => NoteActionResponse::success("Note deleted.", None),
        Err(failure) => failure.into_action("note_delete"),
    }
}

struct CallFailure {
    code: &'static str,
    message: String,
}

impl CallFailure {
    fn into_action(self, call: &str) -> NoteActionResponse {
        NoteActionResponse::failure(self.code, format!("{call} failed: {}", self.message))
    }
}

impl From<StorageError> for CallFailure {
    fn from(value: StorageError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

fn resolve_db_path() -> PathBuf {
    config().db_path.clone()
}

fn with_storage<T>(
    f: impl FnOnce(&StorageService<SqliteNoteRepository<'_>>) -> Result<T, StorageError>,
) -> Result<T, CallFailure> {
    let conn = open_db(resolve_db_path()).map_err(|err| CallFailure {
        code: "db_open_failed",
        message: format!("note DB open failed: {err}"),
    })?;
    let repo = SqliteNoteRepository::try_new(&conn).map_err(|err| CallFailure {
        code: "db_open_failed",
        message: format!("note repo init failed: {err}"),
    })?;
    let storage = StorageService::new(repo);
    f(&storage).map_err(CallFailure::from)
}

fn parse_note_id(raw: &str) -> Result<NoteId, NoteActionResponse> {
    NoteId::parse_str(raw.trim()).map_err(|_| {
        warn!("event=ffi_call module=ffi status=error error_code=invalid_note_id");
        NoteActionResponse::failure("invalid_note_id", format!("invalid note id `{raw}`"))
    })
}

fn to_note_item(note: Note) -> NoteItem {
    NoteItem {
        note_id: note.id.to_string(),
        title: note.title,
    }
}
