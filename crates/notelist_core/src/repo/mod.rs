//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for notes.
//! - Isolate SQLite query details from service/coordination logic.
//!
//! # Invariants
//! - Repository writes enforce `Note::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   transport errors.

pub mod memory_repo;
pub mod note_repo;
