//! Core of the note list: durable note storage and the list coordinator
//! that mirrors it for display.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod coordinator;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use coordinator::list_coordinator::{EditPrompt, ListCoordinator, ListError, ListObserver};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use repo::memory_repo::InMemoryNoteRepository;
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::storage_service::{StorageError, StorageResult, StorageService};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
