mod note;

pub use note::Note;

use crate::config::MAX_NOTES;

/// Application state: an ordered list of notes with one selected
#[derive(Debug, Default)]
pub struct AppState {
    /// Notes in display order
    pub notes: Vec<Note>,
    /// Index of the selected note
    pub selected: usize,
    /// Next id handed out by `add`
    next_id: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-filled with a few notes so the demo has something to act on
    pub fn with_samples() -> Self {
        let mut state = Self::new();
        state.add("Quarterly report", "Numbers due Friday");
        state.add("Groceries", "Oat milk, rice, limes");
        state.add("Ideas", "");
        state
    }

    /// Append a note, returning its id, or `None` once the list is full
    pub fn add(&mut self, title: &str, body: &str) -> Option<u64> {
        if self.notes.len() >= MAX_NOTES {
            tracing::warn!(max = MAX_NOTES, "Note list full, dropping new note");
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.notes.push(Note::new(id, title, body));
        tracing::debug!(id, title, "Added note");
        Some(id)
    }

    /// Rename a note; returns false if no note has `id`
    pub fn rename(&mut self, id: u64, title: &str) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                tracing::debug!(id, from = %note.title, to = title, "Renamed note");
                note.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a note; returns false if no note has `id`
    pub fn remove(&mut self, id: u64) -> bool {
        let Some(pos) = self.notes.iter().position(|n| n.id == id) else {
            return false;
        };
        self.notes.remove(pos);
        self.selected = self.selected.min(self.notes.len().saturating_sub(1));
        tracing::debug!(id, "Removed note");
        true
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.notes.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.notes.is_empty() {
            self.selected = (self.selected + 1) % self.notes.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.notes.is_empty() {
            self.selected = (self.selected + self.notes.len() - 1) % self.notes.len();
        }
    }
}
