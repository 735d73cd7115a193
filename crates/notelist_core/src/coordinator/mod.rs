//! Presentation-facing coordination over the storage service.

pub mod list_coordinator;
