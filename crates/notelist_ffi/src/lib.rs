//! Flutter-facing bindings for the note list core.

pub mod api;
