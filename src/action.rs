//! Application actions
//!
//! Confirm callbacks run inside the dialog presenter, so they never touch
//! app state directly. Instead they post one of these on the app's
//! unbounded action channel, which the app drains after every event.

/// Deferred note operations requested from dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Rename the note with the given id
    Rename { id: u64, title: String },

    /// Create a new note
    Create { title: String, body: String },

    /// Delete the note with the given id
    Delete { id: u64 },
}
