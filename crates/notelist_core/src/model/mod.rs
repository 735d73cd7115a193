//! Domain model for the note list.
//!
//! # Responsibility
//! - Define canonical data structures used by storage and list coordination.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`, independent of its title.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
